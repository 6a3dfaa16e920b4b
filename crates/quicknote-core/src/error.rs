//! Error types for quicknote.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using quicknote's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for quicknote operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Persistence service could not be reached
    #[error("Persistence unavailable: {0}")]
    Unavailable(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Discriminant reported to HTTP clients alongside the message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Unavailable(_) => ErrorKind::Unavailable,
            Error::Database(err) if is_connectivity_error(err) => ErrorKind::Unavailable,
            Error::Database(_) | Error::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Returns true when the sqlx error means the database could not be reached,
/// as opposed to a statement that reached it and failed.
fn is_connectivity_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
    )
}

/// Coarse error category shared by the API and its clients.
///
/// Serialized in snake_case as the `kind` field of every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request itself was malformed (blank text, bad id, bad JSON).
    InvalidInput,
    /// The addressed resource does not exist. Reserved for lookups; no
    /// current endpoint reports it.
    NotFound,
    /// The persistence service is unreachable or timed out.
    Unavailable,
    /// Any other server-side failure.
    Internal,
}

impl ErrorKind {
    /// Stable wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
