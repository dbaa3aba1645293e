//! Stdio connector for a native messaging host.

use std::process::Stdio;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, error, info, warn};

use voxnav_protocols::{ChannelError, Connection, Connector, ProtocolMessage};

use crate::error::FramingError;
use crate::framing::{NativeMessageCodec, DEFAULT_MAX_MESSAGE_BYTES};
use crate::manifest::HostLaunch;

const QUEUE_DEPTH: usize = 64;

/// Spawns the host on every `connect` and frames its stdio.
pub struct NativeHostConnector {
    launch: HostLaunch,
    max_message_bytes: usize,
}

impl NativeHostConnector {
    pub fn new(launch: HostLaunch) -> Self {
        Self {
            launch,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }

    pub fn with_max_message_bytes(mut self, max: usize) -> Self {
        self.max_message_bytes = max;
        self
    }

    pub fn launch(&self) -> &HostLaunch {
        &self.launch
    }

    fn spawn(&self) -> Result<Child, ChannelError> {
        Command::new(&self.launch.program)
            .args(&self.launch.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ChannelError::ConnectionFailed(format!(
                    "{}: {}",
                    self.launch.program.display(),
                    e
                ))
            })
    }
}

#[async_trait]
impl Connector for NativeHostConnector {
    fn endpoint(&self) -> &str {
        &self.launch.name
    }

    async fn connect(&self) -> Result<Connection, ChannelError> {
        let mut child = self.spawn()?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ChannelError::ConnectionFailed("Failed to capture stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ChannelError::ConnectionFailed("Failed to capture stdout".to_string()))?;

        info!(
            host = %self.launch.name,
            pid = child.id(),
            "Native host started"
        );

        let (outbound_tx, outbound_rx) = mpsc::channel(QUEUE_DEPTH);
        let (inbound_tx, inbound_rx) = mpsc::channel(QUEUE_DEPTH);
        let max = self.max_message_bytes;
        let host = self.launch.name.clone();

        tokio::spawn(async move {
            read_frames(stdout, max, inbound_tx).await;
            reap(&host, child);
        });
        tokio::spawn(write_frames(stdin, max, outbound_rx));

        Ok(Connection::new(outbound_tx, inbound_rx))
    }
}

/// Forward decoded frames until EOF, a framing failure, or the receiver going away.
/// Frames that are not JSON are skipped.
pub(crate) async fn read_frames<R>(reader: R, max: usize, inbound: mpsc::Sender<Value>)
where
    R: AsyncRead + Unpin,
{
    let mut frames = FramedRead::new(reader, NativeMessageCodec::new(max));

    while let Some(frame) = frames.next().await {
        let payload = match frame {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Native host stream failed");
                break;
            }
        };

        match serde_json::from_slice::<Value>(&payload) {
            Ok(value) => {
                debug!(bytes = payload.len(), "Frame received");
                if inbound.send(value).await.is_err() {
                    break;
                }
            }
            Err(e) => warn!(error = %e, bytes = payload.len(), "Skipping undecodable frame"),
        }
    }
    debug!("Native host reader finished");
}

/// Write queued messages until the queue closes or the pipe breaks.
/// Messages that cannot be framed are dropped.
pub(crate) async fn write_frames<W>(writer: W, max: usize, mut outbound: mpsc::Receiver<ProtocolMessage>)
where
    W: AsyncWrite + Unpin,
{
    let mut sink = FramedWrite::new(writer, NativeMessageCodec::new(max));

    while let Some(message) = outbound.recv().await {
        match sink.send(&message).await {
            Ok(()) => debug!(id = %message.id, "Frame sent"),
            Err(FramingError::Io(e)) => {
                error!(error = %e, "Native host pipe closed");
                break;
            }
            Err(e) => warn!(id = %message.id, error = %e, "Dropping outgoing message"),
        }
    }
    debug!("Native host writer finished");
}

fn reap(host: &str, mut child: Child) {
    match child.try_wait() {
        Ok(Some(status)) => info!(host, %status, "Native host exited"),
        Ok(None) => warn!(host, "Native host closed stdout, stopping it"),
        Err(e) => warn!(host, error = %e, "Failed to query native host status"),
    }
}

#[cfg(test)]
#[path = "connector_tests.rs"]
mod tests;
