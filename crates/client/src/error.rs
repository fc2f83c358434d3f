//! Client error types.
//!
//! Every failure, whether transport, non-2xx status, or undecodable body, is
//! a fetch failure. Callers show [`ClientError::user_message`] and nothing
//! else; the details are kept for logs.

use std::fmt;

use thiserror::Error;

/// What the caller was trying to do when the request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// A read: listing or fetching recipes and comments.
    Load,
    /// A write: creating or deleting.
    Save,
}

impl Operation {
    /// Generic notice shown to the user for a failed operation.
    #[must_use]
    pub const fn notice(self) -> &'static str {
        match self {
            Self::Load => "Unable to load recipes right now. Please try again later.",
            Self::Save => "Failed to save. Please try again.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => f.write_str("load"),
            Self::Save => f.write_str("save"),
        }
    }
}

/// Why a request failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {error}")]
    Status { status: u16, error: String },

    /// The response body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A failed API call.
#[derive(Debug, Error)]
#[error("{operation} failed: {source}")]
pub struct ClientError {
    pub operation: Operation,
    #[source]
    pub source: FetchError,
}

impl ClientError {
    pub(crate) fn new(operation: Operation, source: impl Into<FetchError>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    /// The single generic message to show the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        self.operation.notice()
    }

    /// HTTP status, when the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match &self.source {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
