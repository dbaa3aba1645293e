//! Hand-written collaborators for core tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc;

use voxnav_protocols::{
    Browser, BrowserError, ChannelError, Connection, Connector, PageRequest, PageResponse,
    PageTransport, ProtocolMessage, Tab, TabId, TabQuery, TransportError,
};

/// Browser with a fixed tab strip that records every call.
#[derive(Default)]
pub struct MockBrowser {
    tabs: Mutex<Vec<Tab>>,
    calls: Mutex<Vec<String>>,
    focus_supported: bool,
    fail_with: Mutex<Option<String>>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tabs `T0..Tn`, with `active` marked active.
    pub fn with_tabs(count: usize, active: Option<usize>) -> Self {
        let tabs = (0..count)
            .map(|i| Tab {
                id: TabId::new(format!("T{}", i)),
                index: i,
                active: Some(i) == active,
                url: None,
                title: None,
            })
            .collect();
        Self {
            tabs: Mutex::new(tabs),
            ..Default::default()
        }
    }

    pub fn with_focus_support(mut self) -> Self {
        self.focus_supported = true;
        self
    }

    pub fn fail_next(&self, message: &str) {
        *self.fail_with.lock() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn active_id(&self) -> Option<String> {
        self.tabs
            .lock()
            .iter()
            .find(|t| t.active)
            .map(|t| t.id.to_string())
    }

    fn record(&self, call: String) -> Result<(), BrowserError> {
        self.calls.lock().push(call);
        match self.fail_with.lock().take() {
            Some(message) => Err(BrowserError::OperationFailed(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Browser for MockBrowser {
    async fn query_tabs(&self, query: TabQuery) -> Result<Vec<Tab>, BrowserError> {
        let tabs = self.tabs.lock().clone();
        Ok(match query.active {
            Some(active) => tabs.into_iter().filter(|t| t.active == active).collect(),
            None => tabs,
        })
    }

    async fn go_back(&self, tab: &TabId) -> Result<(), BrowserError> {
        self.record(format!("back:{}", tab))
    }

    async fn go_forward(&self, tab: &TabId) -> Result<(), BrowserError> {
        self.record(format!("forward:{}", tab))
    }

    async fn reload(&self, tab: &TabId) -> Result<(), BrowserError> {
        self.record(format!("reload:{}", tab))
    }

    async fn create_tab(&self, url: Option<&str>) -> Result<Tab, BrowserError> {
        self.record(format!("create:{}", url.unwrap_or("")))?;
        let mut tabs = self.tabs.lock();
        for tab in tabs.iter_mut() {
            tab.active = false;
        }
        let tab = Tab {
            id: TabId::new(format!("T{}", tabs.len())),
            index: tabs.len(),
            active: true,
            url: url.map(str::to_string),
            title: None,
        };
        tabs.push(tab.clone());
        Ok(tab)
    }

    async fn remove_tab(&self, tab: &TabId) -> Result<(), BrowserError> {
        self.record(format!("remove:{}", tab))?;
        self.tabs.lock().retain(|t| &t.id != tab);
        Ok(())
    }

    async fn activate_tab(&self, tab: &TabId) -> Result<(), BrowserError> {
        self.record(format!("activate:{}", tab))?;
        for t in self.tabs.lock().iter_mut() {
            t.active = &t.id == tab;
        }
        Ok(())
    }

    async fn focus_address_bar(&self) -> Result<bool, BrowserError> {
        self.record("focus_address".to_string())?;
        Ok(self.focus_supported)
    }
}

/// Page transport answering every delivery with a scripted result.
pub struct MockTransport {
    reply: Mutex<Result<PageResponse, TransportError>>,
    delivered: Mutex<Vec<(TabId, PageRequest)>>,
}

impl MockTransport {
    pub fn answering(response: PageResponse) -> Self {
        Self {
            reply: Mutex::new(Ok(response)),
            delivered: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable(error: TransportError) -> Self {
        Self {
            reply: Mutex::new(Err(error)),
            delivered: Mutex::new(Vec::new()),
        }
    }

    pub fn delivered(&self) -> Vec<(TabId, PageRequest)> {
        self.delivered.lock().clone()
    }
}

#[async_trait]
impl PageTransport for MockTransport {
    async fn deliver(
        &self,
        tab: &TabId,
        request: PageRequest,
    ) -> Result<PageResponse, TransportError> {
        self.delivered.lock().push((tab.clone(), request));
        match &*self.reply.lock() {
            Ok(response) => Ok(response.clone()),
            Err(TransportError::NoListener(t)) => Err(TransportError::NoListener(t.clone())),
            Err(TransportError::Closed) => Err(TransportError::Closed),
            Err(TransportError::Other(m)) => Err(TransportError::Other(m.clone())),
        }
    }
}

/// The far end of a scripted connection, held by the test.
pub struct RemoteEnd {
    pub to_host: mpsc::Sender<Value>,
    pub from_host: mpsc::Receiver<ProtocolMessage>,
}

/// Build a connection plus the test's handle on its other end.
pub fn connection_pair() -> (Connection, RemoteEnd) {
    let (out_tx, out_rx) = mpsc::channel(16);
    let (in_tx, in_rx) = mpsc::channel(16);
    (
        Connection::new(out_tx, in_rx),
        RemoteEnd {
            to_host: in_tx,
            from_host: out_rx,
        },
    )
}

/// Connector that hands out queued results, then blocks forever.
pub struct ScriptedConnector {
    script: Mutex<VecDeque<Result<Connection, ChannelError>>>,
    attempts: mpsc::UnboundedSender<tokio::time::Instant>,
}

impl ScriptedConnector {
    pub fn new(
        script: Vec<Result<Connection, ChannelError>>,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<tokio::time::Instant>) {
        let (attempts, rx) = mpsc::unbounded_channel();
        let connector = Arc::new(Self {
            script: Mutex::new(script.into()),
            attempts,
        });
        (connector, rx)
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    fn endpoint(&self) -> &str {
        "scripted"
    }

    async fn connect(&self) -> Result<Connection, ChannelError> {
        let _ = self.attempts.send(tokio::time::Instant::now());
        let next = self.script.lock().pop_front();
        match next {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }
}
