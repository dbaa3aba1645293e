//! Page runtime delivery.
//!
//! Page-level commands are delivered as a `{command, args}` request to the runtime
//! living in a tab, which answers with `{ok: true, ...}` or `{error: "..."}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::browser::TabId;
use crate::command::{CommandArgs, PageCommand};
use crate::error::TransportError;

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;

/// Request delivered to a page runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    pub command: String,
    #[serde(default)]
    pub args: CommandArgs,
}

impl PageRequest {
    pub fn new(command: PageCommand, args: CommandArgs) -> Self {
        Self {
            command: command.as_str().to_string(),
            args,
        }
    }
}

/// Page runtime answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageResponse {
    Rejected {
        error: String,
    },
    Ok {
        ok: bool,
        #[serde(flatten)]
        detail: Map<String, Value>,
    },
}

impl PageResponse {
    pub fn ok() -> Self {
        Self::Ok {
            ok: true,
            detail: Map::new(),
        }
    }

    /// Successful response carrying one extra field.
    pub fn ok_with(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut detail = Map::new();
        detail.insert(key.into(), value.into());
        Self::Ok { ok: true, detail }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self::Rejected {
            error: error.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// Delivers page requests to the runtime of a given tab.
#[async_trait]
pub trait PageTransport: Send + Sync {
    /// Deliver a request and await the runtime's answer.
    ///
    /// Fails with a [`TransportError`] when no runtime is listening in the tab.
    async fn deliver(&self, tab: &TabId, request: PageRequest)
        -> Result<PageResponse, TransportError>;
}
