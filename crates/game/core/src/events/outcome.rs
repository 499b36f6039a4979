use crate::action::RequestId;
use crate::state::{Position, ThingId};

/// Why a request was rejected without touching the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NotAllowedReason {
    /// The actor lacks the movable capability.
    Immovable,
    /// The destination lies outside the world bounds.
    OutOfBounds { destination: Position },
    /// A move with `dx == dy == 0`.
    ZeroDelta,
}

/// Terminal result of resolving one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Succeeded,
    Blocked { blocked_by: ThingId },
    NotAllowed { reason: NotAllowedReason },
    /// Covers both one-sided and mutual destruction of the actor.
    ActorDestroyed { destroyed_by: ThingId },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Succeeded => "succeeded",
            Outcome::Blocked { .. } => "blocked",
            Outcome::NotAllowed { .. } => "not_allowed",
            Outcome::ActorDestroyed { .. } => "actor_destroyed",
        }
    }
}

/// Outcome notification correlated with the request it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeEvent {
    pub request: RequestId,
    /// Request whose push spawned this one, if any.
    pub cause: Option<RequestId>,
    pub actor: ThingId,
    pub outcome: Outcome,
}

/// Registry mutation observed by renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Change {
    Moved {
        thing: ThingId,
        from: Position,
        to: Position,
    },
    Removed {
        thing: ThingId,
        position: Position,
    },
}

/// Change notification tagged with the request that caused it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeEvent {
    pub request: RequestId,
    pub change: Change,
}

impl ChangeEvent {
    pub fn thing(&self) -> ThingId {
        match self.change {
            Change::Moved { thing, .. } | Change::Removed { thing, .. } => thing,
        }
    }
}
