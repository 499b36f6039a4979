//! Action requests issued by input layers and by the resolver itself.
//!
//! The set of action kinds is closed: [`ActionKind`] is matched exhaustively
//! by the resolver, so adding a kind is a compile-time change everywhere it
//! matters.

use std::fmt;

use crate::state::ThingId;

/// Identifier stamped on every request the world resolves.
///
/// Outcome events carry it so that asynchronous subscribers can correlate a
/// notification with the request that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// What the actor wants to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Relative move. Deltas are not restricted to unit steps.
    Move { dx: i32, dy: i32 },
}

/// Immutable request for a thing to act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRequest {
    pub actor: ThingId,
    pub kind: ActionKind,
}

impl ActionRequest {
    pub fn new(actor: ThingId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }

    /// Relative move by `(dx, dy)`.
    pub fn move_by(actor: ThingId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionKind::Move { dx, dy })
    }

    /// Unit step in a cardinal direction.
    pub fn step(actor: ThingId, direction: CardinalDirection) -> Self {
        let (dx, dy) = direction.delta();
        Self::move_by(actor, dx, dy)
    }
}

/// Unit step directions in screen coordinates (y grows downwards).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::East,
        CardinalDirection::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, -1),
            CardinalDirection::South => (0, 1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }
}
