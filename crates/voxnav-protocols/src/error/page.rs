//! Page-side errors.

use thiserror::Error;

/// Failure to reach a page runtime.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No runtime is listening in the tab (non-page context, detached target).
    #[error("Could not establish connection. Receiving end does not exist: {0}")]
    NoListener(String),

    #[error("Connection closed")]
    Closed,

    #[error("{0}")]
    Other(String),
}

/// Failure inside a page runtime.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Document unavailable: {0}")]
    DocumentUnavailable(String),

    /// The node handle no longer refers to a live element.
    #[error("Stale element reference: {0}")]
    StaleElement(u64),

    #[error("Script error: {0}")]
    Script(String),
}
