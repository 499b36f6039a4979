//! Error types for action resolution.

use crate::action::RequestId;
use crate::error::{ErrorSeverity, RealmError};
use crate::state::{StateError, ThingId};

/// Fatal resolution failures. Interaction results are reported as
/// [`Outcome`](crate::events::Outcome) values, never through this type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("actor {actor} is not registered (request {request})")]
    ActorNotFound { actor: ThingId, request: RequestId },

    #[error(transparent)]
    State(#[from] StateError),
}

impl RealmError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound { .. } => ErrorSeverity::Internal,
            Self::State(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound { .. } => "RESOLVE_ACTOR_NOT_FOUND",
            Self::State(err) => err.error_code(),
        }
    }
}
