//! Browser collaborator: tab and window primitives.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BrowserError;

/// Opaque tab identifier assigned by the browser backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A browser tab as reported by [`Browser::query_tabs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    /// Position within its window.
    pub index: usize,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Tab query filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabQuery {
    /// Only tabs with this active state.
    pub active: Option<bool>,
    /// Only tabs of the current window.
    pub current_window: bool,
}

impl TabQuery {
    /// All tabs of the current window, in tab order.
    pub fn current_window() -> Self {
        Self {
            active: None,
            current_window: true,
        }
    }

    /// The active tab of the current window.
    pub fn active_in_current_window() -> Self {
        Self {
            active: Some(true),
            current_window: true,
        }
    }
}

/// Tab and window primitives the dispatcher drives.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Tabs matching the query, ordered by tab index.
    async fn query_tabs(&self, query: TabQuery) -> Result<Vec<Tab>, BrowserError>;

    async fn go_back(&self, tab: &TabId) -> Result<(), BrowserError>;

    async fn go_forward(&self, tab: &TabId) -> Result<(), BrowserError>;

    async fn reload(&self, tab: &TabId) -> Result<(), BrowserError>;

    /// Open a new tab, optionally at a URL.
    async fn create_tab(&self, url: Option<&str>) -> Result<Tab, BrowserError>;

    async fn remove_tab(&self, tab: &TabId) -> Result<(), BrowserError>;

    /// Make a tab the active one of its window.
    async fn activate_tab(&self, tab: &TabId) -> Result<(), BrowserError>;

    /// Focus the address bar. Returns `false` when the request could not take effect.
    async fn focus_address_bar(&self) -> Result<bool, BrowserError> {
        Ok(false)
    }

    /// The active tab of the current window, if any.
    async fn active_tab(&self) -> Result<Option<Tab>, BrowserError> {
        let tabs = self.query_tabs(TabQuery::active_in_current_window()).await?;
        Ok(tabs.into_iter().next())
    }
}
