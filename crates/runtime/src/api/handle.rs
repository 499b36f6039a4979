//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! resolving requests or streaming events from specific topics.
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc, oneshot};

use realm_core::{ActionRequest, OutcomeEvent, ThingId, ThingSpec, WorldSnapshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    pub(crate) fn command_tx(&self) -> &mpsc::Sender<Command> {
        &self.command_tx
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Resolve a request and wait for its outcome.
    ///
    /// Cascaded outcomes are published on [`Topic::Outcome`] only.
    pub async fn resolve(&self, request: ActionRequest) -> Result<OutcomeEvent> {
        self.request(|reply| Command::Resolve {
            request,
            reply: Some(reply),
        })
        .await?
    }

    /// Queue a request without waiting for it.
    ///
    /// Safe to call from event consumers. The outcome arrives on
    /// [`Topic::Outcome`]; resolution failures are only logged.
    pub fn submit(&self, request: ActionRequest) -> Result<()> {
        self.command_tx
            .try_send(Command::Resolve {
                request,
                reply: None,
            })
            .map_err(|err| match err {
                TrySendError::Full(_) => RuntimeError::CommandQueueFull,
                TrySendError::Closed(_) => RuntimeError::CommandChannelClosed,
            })
    }

    /// Place a new thing, checking bounds and occupancy.
    pub async fn spawn(&self, spec: ThingSpec) -> Result<ThingId> {
        self.request(|reply| Command::Spawn { spec, reply }).await?
    }

    /// Read-only copy of the current world.
    pub async fn snapshot(&self) -> Result<WorldSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Remove every thing from the world.
    pub async fn clear(&self) -> Result<()> {
        self.request(|reply| Command::Clear { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use realm_runtime::Topic;
    ///
    /// let mut changes = handle.subscribe(Topic::Change);
    /// while let Ok(event) = changes.recv().await {
    ///     // redraw touched cells
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
