//! Error types for the aggregator

use thiserror::Error;

/// Workspace-wide error type
#[derive(Error, Debug)]
pub enum PoolsError {
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Unknown dex: {0}")]
    UnknownDex(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PoolsError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        PoolsError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        PoolsError::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        PoolsError::Parse(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        PoolsError::NotFound(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        PoolsError::Timeout(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        PoolsError::Internal(msg.into())
    }
}

/// Result type alias for aggregator operations
pub type PoolsResult<T> = Result<T, PoolsError>;
