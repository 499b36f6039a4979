//! Terminal application: boots the runtime, then loops over runtime events,
//! keyboard input and rendering.
use anyhow::{Result, anyhow};
use crossterm::event::{self as term_event, Event as TermEvent, KeyEventKind};
use realm_core::RealmError;
use realm_runtime::{Event as RuntimeEvent, Runtime, RuntimeHandle, Topic};
use tokio::{
    sync::broadcast::{
        self,
        error::{RecvError, TryRecvError},
    },
    time::{self, Duration},
};

use crate::{
    config::ClientConfig,
    input::{InputHandler, KeyAction},
    presentation::{
        terminal::{self, TerminalGuard, Tui},
        ui,
    },
    state::AppState,
};

const FRAME_INTERVAL_MS: u64 = 16;

pub struct App {
    config: ClientConfig,
}

impl App {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> Result<()> {
        tracing::info!(
            config = ?self.config.config_path,
            world = %self.config.tile_world.world.name,
            seed = ?self.config.tile_world.seed,
            "Starting client"
        );

        let runtime = Runtime::builder()
            .config(self.config.runtime.clone())
            .tile_world(self.config.tile_world.clone())
            .build()
            .await?;
        let player = runtime
            .agent()
            .ok_or_else(|| anyhow!("generated world has no agent"))?;

        let handle = runtime.handle();
        let outcomes = runtime.subscribe(Topic::Outcome);
        let changes = runtime.subscribe(Topic::Change);
        let state = AppState::new(handle.snapshot().await?, Some(player));

        let mut tui = terminal::init()?;
        let _guard = TerminalGuard;

        let result = EventLoop {
            handle,
            outcomes,
            changes,
            input: InputHandler::new(player),
            state,
        }
        .run(&mut tui)
        .await;

        finish(result, runtime.shutdown().await)
    }
}

/// The event loop's error wins; a shutdown failure after it is only logged.
fn finish(result: Result<()>, shutdown: realm_runtime::Result<()>) -> Result<()> {
    match (result, shutdown) {
        (Err(error), Err(shutdown_error)) => {
            tracing::error!(
                code = shutdown_error.error_code(),
                error = %shutdown_error,
                "Runtime shutdown failed after event loop error"
            );
            Err(error)
        }
        (Err(error), Ok(())) => Err(error),
        (Ok(()), shutdown) => Ok(shutdown?),
    }
}

struct EventLoop {
    handle: RuntimeHandle,
    outcomes: broadcast::Receiver<RuntimeEvent>,
    changes: broadcast::Receiver<RuntimeEvent>,
    input: InputHandler,
    state: AppState,
}

impl EventLoop {
    async fn run(mut self, tui: &mut Tui) -> Result<()> {
        ui::render(tui, &self.state)?;

        loop {
            let quit = tokio::select! {
                result = self.outcomes.recv() => self.handle_runtime_event(result, tui).await?,
                result = self.changes.recv() => self.handle_runtime_event(result, tui).await?,
                _ = time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)) => {
                    self.handle_input_tick(tui)?
                }
            };
            if quit {
                return Ok(());
            }
        }
    }

    /// Returns true once the loop should stop.
    async fn handle_runtime_event(
        &mut self,
        result: Result<RuntimeEvent, RecvError>,
        tui: &mut Tui,
    ) -> Result<bool> {
        match result {
            Ok(RuntimeEvent::Change(event)) => {
                if self.state.apply_change(&event) {
                    ui::render(tui, &self.state)?;
                }
            }
            Ok(RuntimeEvent::Outcome(event)) => {
                self.state.apply_outcome(&event);
                ui::render(tui, &self.state)?;
            }
            Err(RecvError::Closed) => {
                tracing::warn!("Event stream closed");
                return Ok(true);
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Dropped {} stale events, resynchronising", skipped);
                self.resync().await?;
                ui::render(tui, &self.state)?;
            }
        }
        Ok(false)
    }

    /// Discard queued events on both topics, then reload the world.
    ///
    /// Events still queued predate the snapshot and would move things back.
    async fn resync(&mut self) -> Result<()> {
        let discarded = drain(&mut self.outcomes) + drain(&mut self.changes);
        tracing::debug!(discarded, "Discarded queued events before resync");
        self.state.reset(self.handle.snapshot().await?);
        Ok(())
    }

    fn handle_input_tick(&mut self, tui: &mut Tui) -> Result<bool> {
        if !term_event::poll(Duration::from_millis(0))? {
            return Ok(false);
        }

        match term_event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                match self.input.handle_key(key) {
                    KeyAction::Quit => return Ok(true),
                    KeyAction::Submit(request) if self.state.player_alive() => {
                        match self.handle.submit(request) {
                            Ok(()) => {}
                            Err(error) if error.severity().is_recoverable() => {
                                tracing::debug!(
                                    ?request,
                                    code = error.error_code(),
                                    "Request dropped"
                                );
                            }
                            Err(error) => return Err(error.into()),
                        }
                    }
                    KeyAction::Submit(_) | KeyAction::None => {}
                }
            }
            TermEvent::Resize(_, _) => ui::render(tui, &self.state)?,
            _ => {}
        }
        Ok(false)
    }
}

fn drain(rx: &mut broadcast::Receiver<RuntimeEvent>) -> u64 {
    let mut discarded = 0;
    loop {
        match rx.try_recv() {
            Ok(_) => discarded += 1,
            Err(TryRecvError::Lagged(skipped)) => discarded += skipped,
            Err(TryRecvError::Empty | TryRecvError::Closed) => return discarded,
        }
    }
}
