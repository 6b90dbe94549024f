use crate::http::FetchError;
use thiserror::Error;

/// JSON-RPC error code for invalid method parameters.
pub const INVALID_PARAMS: i64 = -32602;
/// JSON-RPC error code for internal errors.
pub const INTERNAL_ERROR: i64 = -32603;

/// Failure of a news operation.
///
/// Partial failures during a category fetch are not errors; they are carried
/// in the category report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NewsError {
    /// Caller-supplied argument is missing or malformed
    #[error("{0}")]
    InvalidInput(String),

    /// Unknown category or source; the message lists valid alternatives
    #[error("{0}")]
    NotFound(String),

    /// Retrieval failed (network, timeout, non-2xx status, oversized body)
    #[error("{0}")]
    Transport(#[from] FetchError),
}

impl NewsError {
    /// JSON-RPC error code for this failure.
    pub fn code(&self) -> i64 {
        match self {
            NewsError::InvalidInput(_) | NewsError::NotFound(_) => INVALID_PARAMS,
            NewsError::Transport(_) => INTERNAL_ERROR,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, NewsError::Transport(FetchError::Timeout(_)))
    }
}
