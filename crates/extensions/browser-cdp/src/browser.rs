//! `Browser` over CDP targets.
//!
//! CDP has no notion of the focused tab, so the active tab is tracked here:
//! whatever this process last activated or created, falling back to the first
//! page target.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info};

use voxnav_protocols::{Browser, BrowserError, Tab, TabId, TabQuery};

use crate::cdp::{CdpClient, CdpError, PageSession, TargetInfo};

const NEW_TAB_URL: &str = "about:blank";

pub struct CdpBrowser {
    client: CdpClient,
    active: Mutex<Option<String>>,
    sessions: tokio::sync::Mutex<HashMap<String, Arc<PageSession>>>,
}

impl CdpBrowser {
    pub fn new(client: CdpClient) -> Self {
        Self {
            client,
            active: Mutex::new(None),
            sessions: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Connect to a debugging endpoint such as `http://127.0.0.1:9222`.
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        Ok(Self::new(CdpClient::connect(endpoint).await?))
    }

    pub fn client(&self) -> &CdpClient {
        &self.client
    }

    /// Attached session for a tab, attaching on first use or after a detach.
    pub async fn session(&self, tab: &TabId) -> Result<Arc<PageSession>, CdpError> {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get(tab.as_str()) {
            if session.is_attached() {
                return Ok(session.clone());
            }
            debug!(tab = %tab, "Session detached, reattaching");
        }
        sessions.retain(|_, session| session.is_attached());

        let targets = self.client.get_targets().await?;
        if !targets.iter().any(|t| t.is_page() && t.target_id == tab.as_str()) {
            sessions.remove(tab.as_str());
            return Err(CdpError::PageNotFound(tab.to_string()));
        }

        let session = Arc::new(self.client.attach_page(tab.as_str()).await?);
        sessions.insert(tab.to_string(), session.clone());
        Ok(session)
    }

    pub async fn forget(&self, tab: &TabId) {
        self.sessions.lock().await.remove(tab.as_str());
    }
}

/// Page targets as tabs, marking `active` (or the first page) as the active one.
pub(crate) fn tabs_from_targets(targets: &[TargetInfo], active: Option<&str>) -> Vec<Tab> {
    let pages: Vec<&TargetInfo> = targets.iter().filter(|t| t.is_page()).collect();
    let active = active
        .filter(|id| pages.iter().any(|t| t.target_id == *id))
        .or_else(|| pages.first().map(|t| t.target_id.as_str()));

    pages
        .iter()
        .enumerate()
        .map(|(index, t)| Tab {
            id: TabId::new(t.target_id.clone()),
            index,
            active: Some(t.target_id.as_str()) == active,
            url: Some(t.url.clone()),
            title: Some(t.title.clone()),
        })
        .collect()
}

#[async_trait]
impl Browser for CdpBrowser {
    async fn query_tabs(&self, query: TabQuery) -> Result<Vec<Tab>, BrowserError> {
        let targets = self.client.get_targets().await?;
        let active = self.active.lock().clone();
        let tabs = tabs_from_targets(&targets, active.as_deref());

        Ok(match query.active {
            Some(wanted) => tabs.into_iter().filter(|t| t.active == wanted).collect(),
            None => tabs,
        })
    }

    async fn go_back(&self, tab: &TabId) -> Result<(), BrowserError> {
        self.session(tab).await?.go_back().await?;
        Ok(())
    }

    async fn go_forward(&self, tab: &TabId) -> Result<(), BrowserError> {
        self.session(tab).await?.go_forward().await?;
        Ok(())
    }

    async fn reload(&self, tab: &TabId) -> Result<(), BrowserError> {
        self.session(tab).await?.reload().await?;
        Ok(())
    }

    async fn create_tab(&self, url: Option<&str>) -> Result<Tab, BrowserError> {
        let url = url.unwrap_or(NEW_TAB_URL);
        let target_id = self.client.create_target(url).await?;
        *self.active.lock() = Some(target_id.clone());
        info!(tab = %target_id, url, "Tab created");

        let tabs = self.query_tabs(TabQuery::current_window()).await?;
        tabs.into_iter()
            .find(|t| t.id.as_str() == target_id)
            .ok_or(BrowserError::TabNotFound(target_id))
    }

    async fn remove_tab(&self, tab: &TabId) -> Result<(), BrowserError> {
        self.client.close_target(tab.as_str()).await?;
        self.forget(tab).await;
        let mut active = self.active.lock();
        if active.as_deref() == Some(tab.as_str()) {
            *active = None;
        }
        Ok(())
    }

    async fn activate_tab(&self, tab: &TabId) -> Result<(), BrowserError> {
        self.client.activate_target(tab.as_str()).await?;
        *self.active.lock() = Some(tab.to_string());
        debug!(tab = %tab, "Tab activated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: &str, kind: &str) -> TargetInfo {
        TargetInfo {
            target_id: id.to_string(),
            target_type: kind.to_string(),
            title: format!("title {}", id),
            url: format!("https://{}.test/", id),
            attached: None,
            browser_context_id: None,
        }
    }

    #[test]
    fn test_tabs_skip_non_page_targets() {
        let targets = vec![
            target("A", "page"),
            target("W", "service_worker"),
            target("B", "page"),
        ];

        let tabs = tabs_from_targets(&targets, Some("B"));

        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[1].id.as_str(), "B");
        assert_eq!(tabs[1].index, 1);
        assert!(tabs[1].active);
        assert!(!tabs[0].active);
    }

    #[test]
    fn test_first_page_is_active_by_default() {
        let targets = vec![target("A", "page"), target("B", "page")];

        let tabs = tabs_from_targets(&targets, None);
        assert!(tabs[0].active);

        // A tracked tab that has since closed falls back the same way.
        let tabs = tabs_from_targets(&targets, Some("gone"));
        assert!(tabs[0].active);
        assert_eq!(tabs.iter().filter(|t| t.active).count(), 1);
    }

    #[test]
    fn test_no_pages_no_tabs() {
        let tabs = tabs_from_targets(&[target("W", "service_worker")], None);
        assert!(tabs.is_empty());
    }
}
