//! CDP error types.

use thiserror::Error;
use voxnav_protocols::{BrowserError, PageError, TransportError};

#[derive(Debug, Error)]
pub enum CdpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Browser not running with remote debugging.
    #[error("Browser not available at {0}. Start it with: chromium --remote-debugging-port=9222")]
    ChromeNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CdpError {
    /// The debugging connection itself is gone or never came up.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            CdpError::ConnectionFailed(_)
                | CdpError::ChromeNotAvailable(_)
                | CdpError::WebSocket(_)
        )
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::PageNotFound(id) => BrowserError::TabNotFound(id),
            e if e.is_connection() => BrowserError::Unavailable(e.to_string()),
            e => BrowserError::OperationFailed(e.to_string()),
        }
    }
}

impl From<CdpError> for TransportError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::SessionClosed => TransportError::Closed,
            CdpError::PageNotFound(id) => TransportError::NoListener(id),
            e => TransportError::Other(e.to_string()),
        }
    }
}

impl From<CdpError> for PageError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::JavaScript(message) => PageError::Script(message),
            e => PageError::DocumentUnavailable(e.to_string()),
        }
    }
}
