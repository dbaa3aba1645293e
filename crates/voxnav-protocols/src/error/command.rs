//! Command execution errors.
//!
//! Every variant's display text is what the controller receives in the `message`
//! field of an `error` response.

use thiserror::Error;

use super::{BrowserError, TransportError};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A required argument is absent; the message is the descriptor's own text.
    #[error("{message}")]
    MissingArgument { name: String, message: String },

    /// Page-level commands have no meaningful fallback without a tab.
    #[error("No active tab found")]
    NoActiveTab,

    #[error("Content script not ready: {0}")]
    ContentScriptNotReady(String),

    #[error("{0}")]
    Browser(#[from] BrowserError),
}

impl CommandError {
    pub fn missing_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingArgument {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<TransportError> for CommandError {
    fn from(e: TransportError) -> Self {
        CommandError::ContentScriptNotReady(e.to_string())
    }
}
