//! Simulation worker that owns the authoritative [`realm_core::World`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), resolves
//! them one at a time and forwards the world's notifications to the
//! [`EventBus`].

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

use realm_core::{
    ActionRequest, ChangeEvent, OutcomeEvent, RealmError, ThingId, ThingSpec, World,
    WorldSnapshot,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Resolve a request. Without a reply channel the request is fire-and-forget.
    Resolve {
        request: ActionRequest,
        reply: Option<oneshot::Sender<Result<OutcomeEvent>>>,
    },
    /// Place a new thing.
    Spawn {
        spec: ThingSpec,
        reply: oneshot::Sender<Result<ThingId>>,
    },
    /// Query the current world (read-only).
    Snapshot { reply: oneshot::Sender<WorldSnapshot> },
    /// Tear down every thing.
    Clear { reply: oneshot::Sender<()> },
    /// Stop the worker loop.
    Shutdown,
}

/// Background task that processes simulation commands.
pub struct SimulationWorker {
    world: World,
    command_rx: mpsc::Receiver<Command>,
}

impl SimulationWorker {
    /// Creates a new simulation worker and bridges the world's channels onto
    /// `event_bus`.
    pub fn new(mut world: World, command_rx: mpsc::Receiver<Command>, event_bus: EventBus) -> Self {
        let outcome_bus = event_bus.clone();
        world.subscribe_outcomes(move |event: &OutcomeEvent| {
            outcome_bus.publish(Event::Outcome(*event));
        });
        world.subscribe_changes(move |event: &ChangeEvent| {
            event_bus.publish(Event::Change(*event));
        });

        tracing::info!(
            world = %world.name(),
            things = world.len(),
            "SimulationWorker initialized"
        );

        Self { world, command_rx }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                else => break,
            }
        }
        tracing::info!(world = %self.world.name(), "SimulationWorker stopped");
    }

    /// Returns false once the worker should stop.
    fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Resolve { request, reply } => {
                let result = self.resolve(&request);
                match reply {
                    Some(reply) => {
                        let _ = reply.send(result);
                    }
                    None => {
                        if let Err(error) = result {
                            log_queued_failure(&request, &error);
                        }
                    }
                }
            }
            Command::Spawn { spec, reply } => {
                let result = self.world.spawn(spec).map_err(Into::into);
                let _ = reply.send(result);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.world.snapshot());
            }
            Command::Clear { reply } => {
                self.world.clear();
                let _ = reply.send(());
            }
            Command::Shutdown => return false,
        }
        true
    }

    fn resolve(&mut self, request: &ActionRequest) -> Result<OutcomeEvent> {
        let event = self.world.resolve(request)?;
        debug!(
            target: "runtime::worker",
            request = %event.request,
            actor = %event.actor,
            outcome = event.outcome.as_str(),
            "Request resolved"
        );
        Ok(event)
    }
}

fn log_queued_failure(request: &ActionRequest, err: &RuntimeError) {
    let severity = err.severity();
    if severity.is_internal() {
        error!(
            target: "runtime::worker",
            request = ?request,
            code = err.error_code(),
            severity = severity.as_str(),
            error = %err,
            "Queued request failed"
        );
    } else {
        warn!(
            target: "runtime::worker",
            request = ?request,
            code = err.error_code(),
            severity = severity.as_str(),
            error = %err,
            "Queued request failed"
        );
    }
}
