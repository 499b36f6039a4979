//! Registry errors.
//!
//! Errors related to thing allocation, placement and lookup.

use crate::error::{ErrorSeverity, RealmError};
use crate::state::{Position, ThingId, ThingSpecError};

/// Errors that occur during world registry operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Referenced thing is not registered in the world.
    #[error("thing {id} not found in world '{world}'")]
    ThingNotFound { id: ThingId, world: String },

    /// Thing identifier allocation overflow (all ids exhausted).
    #[error("thing id overflow (current: {current})")]
    ThingIdOverflow { current: ThingId },

    /// Position is outside the world bounds.
    #[error("position {position} is out of bounds (world size: {width}x{height})")]
    PositionOutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    /// Position is already occupied by another thing.
    #[error("position {position} is already occupied by thing {occupant}")]
    PositionOccupied {
        position: Position,
        occupant: ThingId,
    },

    /// Thing identifier is already registered.
    #[error("thing {id} is already registered")]
    DuplicateId { id: ThingId },

    #[error(transparent)]
    InvalidSpec(#[from] ThingSpecError),
}

impl RealmError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            ThingNotFound { .. } => ErrorSeverity::Internal,
            ThingIdOverflow { .. } => ErrorSeverity::Fatal,
            // Placement conflicts: caller may pick another cell
            PositionOccupied { .. } | DuplicateId { .. } => ErrorSeverity::Recoverable,
            PositionOutOfBounds { .. } | InvalidSpec(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            ThingNotFound { .. } => "STATE_THING_NOT_FOUND",
            ThingIdOverflow { .. } => "STATE_THING_ID_OVERFLOW",
            PositionOutOfBounds { .. } => "STATE_POSITION_OUT_OF_BOUNDS",
            PositionOccupied { .. } => "STATE_POSITION_OCCUPIED",
            DuplicateId { .. } => "STATE_DUPLICATE_ID",
            InvalidSpec(_) => "STATE_INVALID_SPEC",
        }
    }
}
