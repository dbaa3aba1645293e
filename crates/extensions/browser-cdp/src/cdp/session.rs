//! Session attached to a single page target.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use super::client::Wire;
use super::error::CdpError;
use super::protocol::NavigationHistory;

pub struct PageSession {
    target_id: String,
    session_id: String,
    wire: Arc<Wire>,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, wire: Arc<Wire>) -> Self {
        Self {
            target_id,
            session_id,
            wire,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// False once the browser detached this session (navigation to a
    /// privileged page, tab closed, crash).
    pub fn is_attached(&self) -> bool {
        !self.wire.is_detached(&self.session_id)
    }

    /// Send a command to this page.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.wire.call(method, params, Some(&self.session_id)).await
    }

    /// Evaluate an expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["exception"]["description"]
                .as_str()
                .or_else(|| exception["text"].as_str())
                .unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }

        Ok(result["result"]["value"].clone())
    }

    pub async fn reload(&self) -> Result<(), CdpError> {
        self.call("Page.reload", None).await?;
        Ok(())
    }

    pub async fn go_back(&self) -> Result<(), CdpError> {
        self.step_history(-1).await
    }

    pub async fn go_forward(&self) -> Result<(), CdpError> {
        self.step_history(1).await
    }

    /// Move `offset` entries through the session history. No entry, no-op.
    async fn step_history(&self, offset: i64) -> Result<(), CdpError> {
        let history: NavigationHistory =
            serde_json::from_value(self.call("Page.getNavigationHistory", None).await?)?;

        match history.relative(offset) {
            Some(entry) => {
                self.call(
                    "Page.navigateToHistoryEntry",
                    Some(json!({"entryId": entry.id})),
                )
                .await?;
                debug!(target = %self.target_id, url = %entry.url, "History step");
            }
            None => debug!(target = %self.target_id, offset, "No history entry"),
        }
        Ok(())
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.wire.release_session(&self.session_id);
    }
}
