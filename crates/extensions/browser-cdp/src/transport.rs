//! `PageTransport` that runs a page runtime per tab.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use voxnav_page_hints::{PageRuntime, ScrollSettings};
use voxnav_protocols::{PageRequest, PageResponse, PageTransport, TabId, TransportError};

use crate::browser::CdpBrowser;
use crate::cdp::{CdpError, PageSession};
use crate::document::CdpDocument;

/// Runtimes keyed by tab, each bound to the session it was started on.
struct Runtimes<S> {
    entries: HashMap<TabId, (S, Arc<PageRuntime>)>,
}

impl<S> Default for Runtimes<S> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<S> Runtimes<S> {
    /// The tab's runtime if it was started on a session `same` accepts.
    fn get(&self, tab: &TabId, same: impl Fn(&S) -> bool) -> Option<Arc<PageRuntime>> {
        self.entries
            .get(tab)
            .filter(|(session, _)| same(session))
            .map(|(_, runtime)| runtime.clone())
    }

    fn insert(&mut self, tab: TabId, session: S, runtime: Arc<PageRuntime>) {
        self.entries.insert(tab, (session, runtime));
    }

    fn remove(&mut self, tab: &TabId) {
        self.entries.remove(tab);
    }

    /// Drop runtimes whose session is gone.
    fn prune(&mut self, alive: impl Fn(&S) -> bool) {
        self.entries.retain(|_, (session, _)| alive(session));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Delivers page requests to a lazily attached [`PageRuntime`] per tab.
///
/// A runtime, and with it any mounted hint session, lives as long as the tab's
/// CDP session. Reattaching after a detach starts a fresh runtime.
pub struct CdpPageTransport {
    browser: Arc<CdpBrowser>,
    scroll: ScrollSettings,
    runtimes: tokio::sync::Mutex<Runtimes<Arc<PageSession>>>,
}

impl CdpPageTransport {
    pub fn new(browser: Arc<CdpBrowser>, scroll: ScrollSettings) -> Self {
        Self {
            browser,
            scroll,
            runtimes: tokio::sync::Mutex::new(Runtimes::default()),
        }
    }

    async fn runtime(&self, tab: &TabId) -> Result<Arc<PageRuntime>, TransportError> {
        let attached = self.browser.session(tab).await;

        let mut runtimes = self.runtimes.lock().await;
        runtimes.prune(|session| session.is_attached());

        let session = match attached {
            Ok(session) => session,
            Err(e) => {
                runtimes.remove(tab);
                return Err(attach_error(tab, e));
            }
        };

        if let Some(runtime) = runtimes.get(tab, |s| Arc::ptr_eq(s, &session)) {
            return Ok(runtime);
        }

        debug!(tab = %tab, session = %session.session_id(), "Starting page runtime");
        let document = Arc::new(CdpDocument::new(session.clone()));
        let runtime = Arc::new(PageRuntime::new(document, self.scroll));
        runtimes.insert(tab.clone(), session, runtime.clone());
        Ok(runtime)
    }
}

/// Keep the CDP failure text; the controller sees it after "Content script not ready".
fn attach_error(tab: &TabId, e: CdpError) -> TransportError {
    warn!(tab = %tab, error = %e, "No page runtime for tab");
    TransportError::from(e)
}

#[async_trait]
impl PageTransport for CdpPageTransport {
    async fn deliver(
        &self,
        tab: &TabId,
        request: PageRequest,
    ) -> Result<PageResponse, TransportError> {
        let runtime = self.runtime(tab).await?;
        Ok(runtime.handle(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxnav_page_hints::memory::MemoryDocument;
    use voxnav_page_hints::ViewportInfo;
    use voxnav_protocols::CommandError;

    fn runtime() -> Arc<PageRuntime> {
        let document = Arc::new(MemoryDocument::new(ViewportInfo::default()));
        Arc::new(PageRuntime::new(document, ScrollSettings::default()))
    }

    #[test]
    fn test_attach_timeout_keeps_cause() {
        let err = attach_error(
            &TabId::new("T1"),
            CdpError::Timeout("Request Target.getTargets timed out".to_string()),
        );
        let message = CommandError::from(err).to_string();

        assert!(message.starts_with("Content script not ready: "));
        assert!(message.contains("Request Target.getTargets timed out"));
    }

    #[test]
    fn test_closed_socket_keeps_cause() {
        let err = attach_error(
            &TabId::new("T1"),
            CdpError::ConnectionFailed("browser connection closed".to_string()),
        );

        assert!(CommandError::from(err)
            .to_string()
            .contains("browser connection closed"));
    }

    #[test]
    fn test_missing_page_has_no_listener() {
        let err = attach_error(&TabId::new("T9"), CdpError::PageNotFound("T9".to_string()));
        assert!(matches!(err, TransportError::NoListener(ref id) if id == "T9"));
    }

    #[test]
    fn test_runtime_reused_only_for_same_session() {
        let mut runtimes = Runtimes::default();
        let tab = TabId::new("T1");
        let first = runtime();
        runtimes.insert(tab.clone(), "S1", first.clone());

        let found = runtimes.get(&tab, |s| *s == "S1").unwrap();
        assert!(Arc::ptr_eq(&found, &first));
        assert!(runtimes.get(&tab, |s| *s == "S2").is_none());
    }

    #[test]
    fn test_prune_drops_dead_sessions() {
        let mut runtimes = Runtimes::default();
        runtimes.insert(TabId::new("T1"), "live", runtime());
        runtimes.insert(TabId::new("T2"), "gone", runtime());
        runtimes.insert(TabId::new("T3"), "live", runtime());

        runtimes.prune(|s| *s == "live");
        assert_eq!(runtimes.len(), 2);

        runtimes.remove(&TabId::new("T1"));
        assert_eq!(runtimes.len(), 1);
        assert!(runtimes.get(&TabId::new("T2"), |_| true).is_none());
    }
}
