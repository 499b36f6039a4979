//! Deterministic grid simulation core.
//!
//! `realm-core` defines the entity model, the action vocabulary, the world
//! registry and the resolver that turns move requests into outcomes. All
//! mutation flows through [`World`]; outer crates observe it through the
//! outcome and change channels the world owns.
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod state;

pub use action::{ActionKind, ActionRequest, CardinalDirection, RequestId};
pub use config::{ConfigError, WorldConfig};
pub use engine::{Interaction, ResolveError, Resolver};
pub use error::{ErrorSeverity, RealmError};
pub use events::{
    Change, ChangeEvent, Channel, EventLog, NotAllowedReason, Outcome, OutcomeEvent, Subscriber,
    SubscriptionId,
};
pub use state::{
    Capabilities, Color, KindSet, Position, StateError, Thing, ThingId, ThingSpec, ThingSpecError,
    World, WorldId, WorldSnapshot,
};
