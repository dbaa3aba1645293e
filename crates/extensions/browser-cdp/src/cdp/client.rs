//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashSet;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, trace, warn};

use super::error::CdpError;
use super::protocol::{BrowserVersion, CdpRequest, CdpResponse, TargetInfo};
use super::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

const CALL_TIMEOUT: Duration = Duration::from_secs(30);

type Pending = Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>;

/// Sessions the browser reported as detached that a live `PageSession` still names.
#[derive(Default)]
pub(crate) struct DetachedSessions(DashSet<String>);

impl DetachedSessions {
    /// Record a `Target.detachedFromTarget` event; other messages are ignored.
    pub(crate) fn observe(&self, resp: &CdpResponse) {
        if resp.method.as_deref() != Some("Target.detachedFromTarget") {
            return;
        }
        if let Some(session) = resp.params.as_ref().and_then(|p| p["sessionId"].as_str()) {
            debug!(session, "Page session detached");
            self.0.insert(session.to_string());
        }
    }

    pub(crate) fn contains(&self, session_id: &str) -> bool {
        self.0.contains(session_id)
    }

    /// Forget a session once nothing refers to it any more.
    pub(crate) fn release(&self, session_id: &str) {
        self.0.remove(session_id);
    }
}

/// State shared by the client and every page session it hands out.
pub(crate) struct Wire {
    ws_tx: tokio::sync::Mutex<WsSink>,
    request_id: AtomicU64,
    pending: Pending,
    detached: DetachedSessions,
    open: AtomicBool,
}

impl Wire {
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        if !self.open.load(Ordering::SeqCst) {
            return Err(CdpError::ConnectionFailed("browser connection closed".to_string()));
        }
        if let Some(session) = session_id {
            if self.detached.contains(session) {
                return Err(CdpError::SessionClosed);
            }
        }

        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(str::to_string),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        let sent = {
            let mut ws = self.ws_tx.lock().await;
            ws.send(Message::Text(json.into())).await
        };
        if let Err(e) = sent {
            self.pending.lock().remove(&id);
            return Err(e.into());
        }

        match tokio::time::timeout(CALL_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }

    pub(crate) fn is_detached(&self, session_id: &str) -> bool {
        self.detached.contains(session_id)
    }

    pub(crate) fn release_session(&self, session_id: &str) {
        self.detached.release(session_id);
    }

    fn complete(&self, resp: CdpResponse) {
        if let Some(id) = resp.id {
            let Some(tx) = self.pending.lock().remove(&id) else {
                return;
            };
            let result = match resp.error {
                Some(error) => Err(CdpError::Protocol {
                    code: error.code,
                    message: error.message,
                }),
                None => Ok(resp.result.unwrap_or(Value::Null)),
            };
            let _ = tx.send(result);
            return;
        }

        self.detached.observe(&resp);
    }

    /// Fail everything still waiting and refuse new calls.
    fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
        self.pending.lock().clear();
    }
}

/// CDP client for a browser started with remote debugging.
pub struct CdpClient {
    http_endpoint: String,
    browser_ws_url: String,
    wire: Arc<Wire>,
    _recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to the browser at a debugging endpoint such as `http://127.0.0.1:9222`.
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();

        let version_url = format!("{}/json/version", http_endpoint);
        debug!("Fetching browser version from {}", version_url);

        let version: BrowserVersion = reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?;

        let browser_ws_url = version.web_socket_debugger_url;

        let (ws_stream, _) = tokio_tungstenite::connect_async(&browser_ws_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let wire = Arc::new(Wire {
            ws_tx: tokio::sync::Mutex::new(ws_sink),
            request_id: AtomicU64::new(1),
            pending: Mutex::new(HashMap::new()),
            detached: DetachedSessions::default(),
            open: AtomicBool::new(true),
        });

        let recv_task = {
            let wire = wire.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, &wire).await;
                wire.close();
            })
        };

        info!(
            browser = %version.browser,
            protocol = %version.protocol_version,
            "Connected to browser"
        );

        Ok(Self {
            http_endpoint,
            browser_ws_url,
            wire,
            _recv_task: recv_task,
        })
    }

    async fn receive_loop(mut ws_source: WsSource, wire: &Wire) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => wire.complete(resp),
                        Err(e) => warn!("Failed to parse CDP message: {}", e),
                    }
                }
                Ok(Message::Close(_)) => {
                    warn!("Browser closed the debugging connection");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    }

    /// Send a browser-level command and wait for its response.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.wire.call(method, params, None).await
    }

    pub fn endpoint(&self) -> &str {
        &self.http_endpoint
    }

    pub fn browser_ws_url(&self) -> &str {
        &self.browser_ws_url
    }

    pub fn is_connected(&self) -> bool {
        self.wire.open.load(Ordering::SeqCst)
    }

    /// All targets the browser knows about.
    pub async fn get_targets(&self) -> Result<Vec<TargetInfo>, CdpError> {
        let result = self.call("Target.getTargets", None).await?;
        let targets: Vec<TargetInfo> = serde_json::from_value(result["targetInfos"].clone())?;
        Ok(targets)
    }

    /// Open a page target and return its id.
    pub async fn create_target(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Target.createTarget", Some(json!({"url": url})))
            .await?;
        result["targetId"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CdpError::InvalidResponse("Missing targetId".to_string()))
    }

    pub async fn activate_target(&self, target_id: &str) -> Result<(), CdpError> {
        self.call(
            "Target.activateTarget",
            Some(json!({"targetId": target_id})),
        )
        .await?;
        Ok(())
    }

    pub async fn close_target(&self, target_id: &str) -> Result<(), CdpError> {
        self.call("Target.closeTarget", Some(json!({"targetId": target_id})))
            .await?;
        Ok(())
    }

    /// Attach a flat session to an existing page.
    pub async fn attach_page(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        debug!(target = target_id, session = %session_id, "Attached to page");
        Ok(PageSession::new(
            target_id.to_string(),
            session_id,
            self.wire.clone(),
        ))
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self._recv_task.abort();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
