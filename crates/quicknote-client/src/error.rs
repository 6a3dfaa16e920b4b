//! Client-side error taxonomy.
//!
//! Server failures carry the server's [`ErrorKind`]; transport failures add
//! `Network` (no response) and `Decode` (unreadable response).

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

use quicknote_core::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientErrorKind {
    /// The request never produced a response (refused, reset, timed out).
    Network,
    /// A response arrived but its body could not be read.
    Decode,
    InvalidInput,
    NotFound,
    /// The server answered but its persistence service is down.
    Unavailable,
    /// Any other server-side failure.
    Server,
}

impl ClientErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientErrorKind::Network => "network",
            ClientErrorKind::Decode => "decode",
            ClientErrorKind::InvalidInput => "invalid_input",
            ClientErrorKind::NotFound => "not_found",
            ClientErrorKind::Unavailable => "unavailable",
            ClientErrorKind::Server => "server",
        }
    }

    /// Fallback classification when the error body carries no `kind`.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::PAYLOAD_TOO_LARGE => {
                ClientErrorKind::InvalidInput
            }
            StatusCode::NOT_FOUND => ClientErrorKind::NotFound,
            StatusCode::SERVICE_UNAVAILABLE => ClientErrorKind::Unavailable,
            _ => ClientErrorKind::Server,
        }
    }
}

impl From<ErrorKind> for ClientErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidInput => ClientErrorKind::InvalidInput,
            ErrorKind::NotFound => ClientErrorKind::NotFound,
            ErrorKind::Unavailable => ClientErrorKind::Unavailable,
            ErrorKind::Internal => ClientErrorKind::Server,
        }
    }
}

impl fmt::Display for ClientErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed call to the notes API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: ClientErrorKind,
    pub message: String,
}

impl ClientError {
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Decode, message)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::decode(e.to_string())
        } else {
            ClientError::network(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
