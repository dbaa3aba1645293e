//! Message validation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The message cannot be correlated or classified.
    #[error("Malformed message: {0}")]
    Malformed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
