//! Control channel endpoints.
//!
//! A [`Connector`] opens one bidirectional connection to the controller. The
//! connection is a pair of queues: protocol messages go out through `outbound`,
//! decoded JSON values arrive on `inbound`. The inbound queue closing is the
//! disconnect signal.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::ChannelError;
use crate::message::ProtocolMessage;

/// One established connection.
#[derive(Debug)]
pub struct Connection {
    pub outbound: mpsc::Sender<ProtocolMessage>,
    pub inbound: mpsc::Receiver<Value>,
}

impl Connection {
    pub fn new(outbound: mpsc::Sender<ProtocolMessage>, inbound: mpsc::Receiver<Value>) -> Self {
        Self { outbound, inbound }
    }
}

/// Opens connections to a named endpoint.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Endpoint name, for logs.
    fn endpoint(&self) -> &str;

    async fn connect(&self) -> Result<Connection, ChannelError>;
}
