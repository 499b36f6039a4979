//! Runtime orchestration for the realm simulation.
//!
//! This crate runs a [`realm_core::World`] inside a single simulation worker
//! task. Requests enter through a bounded command queue, and the world's
//! synchronous notifications are forwarded onto a topic-based event bus.
//! Consumers embed [`Runtime`] and interact with the world through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
