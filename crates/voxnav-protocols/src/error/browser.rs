//! Browser collaborator errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Tab not found: {0}")]
    TabNotFound(String),

    #[error("Browser unavailable: {0}")]
    Unavailable(String),

    #[error("Browser operation failed: {0}")]
    OperationFailed(String),
}
