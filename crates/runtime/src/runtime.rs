//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the world.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use realm_content::{TileWorld, TileWorldConfig, TileWorldGenerator};
use realm_core::{ThingId, World};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates the simulation
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    agent: Option<ThingId>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Player agent placed by the tile world generator, if one was used.
    pub fn agent(&self) -> Option<ThingId> {
        self.agent
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Commands queued before the call are still processed.
    pub async fn shutdown(self) -> Result<()> {
        // A closed queue means the worker is already gone; the join reports why.
        let _ = self.handle.command_tx().send(Command::Shutdown).await;
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        tracing::info!("Runtime stopped");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: Option<World>,
    tile_world: Option<TileWorldConfig>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
            tile_world: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Run a world built by the caller
    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Generate a tile world on build. Ignored when a world is provided.
    pub fn tile_world(mut self, config: TileWorldConfig) -> Self {
        self.tile_world = Some(config);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let (world, agent) = match (self.world, self.tile_world) {
            (Some(world), _) => (world, None),
            (None, Some(config)) => {
                let TileWorld { world, agent } = generate(&config)?;
                (world, Some(agent))
            }
            (None, None) => return Err(RuntimeError::MissingWorld),
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(world, command_rx, event_bus);
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        tracing::info!(agent = ?agent, "Runtime started");

        Ok(Runtime {
            handle,
            agent,
            sim_worker_handle,
        })
    }
}

fn generate(config: &TileWorldConfig) -> Result<TileWorld> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(TileWorldGenerator::new(config).generate(&mut rng)?)
}
