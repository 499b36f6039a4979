//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and from the core so clients can
//! bubble them up with consistent context.
use realm_content::GenerateError;
use realm_core::{ErrorSeverity, RealmError, ResolveError, StateError};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker command queue is full")]
    CommandQueueFull,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a world or a tile world config before building")]
    MissingWorld,

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("failed to generate initial world")]
    Generate(#[from] GenerateError),
}

impl RealmError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CommandQueueFull => ErrorSeverity::Recoverable,
            Self::MissingWorld => ErrorSeverity::Validation,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) | Self::WorkerJoin(_) => {
                ErrorSeverity::Fatal
            }
            Self::Resolve(err) => err.severity(),
            Self::State(err) => err.severity(),
            Self::Generate(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::CommandQueueFull => "RUNTIME_COMMAND_QUEUE_FULL",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::MissingWorld => "RUNTIME_MISSING_WORLD",
            Self::Resolve(err) => err.error_code(),
            Self::State(err) => err.error_code(),
            Self::Generate(err) => err.error_code(),
        }
    }
}
