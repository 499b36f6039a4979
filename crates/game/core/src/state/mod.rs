//! World registry and the entity model.
//!
//! [`World`] owns every [`Thing`] together with the outbound notification
//! channels. Layers above clone a [`WorldSnapshot`] for reading and mutate only
//! through the world's own methods.
mod common;
mod error;
mod snapshot;
mod thing;
mod world;

pub use common::{Color, Position, ThingId};
pub use error::StateError;
pub use snapshot::WorldSnapshot;
pub use thing::{Capabilities, KindSet, Thing, ThingSpec, ThingSpecError};
pub use world::{World, WorldId};
