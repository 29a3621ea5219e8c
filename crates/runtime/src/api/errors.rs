//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, the battle engine, and the
//! persistence gateway so clients can bubble them up with consistent context.
use quest_core::{BattleError, GameError};
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("session requires oracles to be configured before starting")]
    MissingOracles,
}

impl SessionError {
    /// True when the engine turned the command away without touching state,
    /// e.g. a round requested while another is still being paced.
    pub fn is_rejection(&self) -> bool {
        matches!(self, SessionError::Battle(err) if err.is_rejection())
    }

    /// Stable code for logs and client messages.
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::Battle(err) => err.error_code(),
            SessionError::Repository(_) => "SESSION_PERSISTENCE",
            SessionError::CommandChannelClosed | SessionError::ReplyChannelClosed(_) => {
                "SESSION_CLOSED"
            }
            SessionError::WorkerJoin(_) => "SESSION_WORKER_JOIN",
            SessionError::MissingOracles => "SESSION_MISSING_ORACLES",
        }
    }
}
