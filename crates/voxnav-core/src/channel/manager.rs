use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use voxnav_protocols::{Connection, Connector, ProtocolMessage};

use super::slot::ChannelSlot;
use crate::dispatcher::Dispatcher;

/// Keeps one connection to the controller alive and serves it.
pub struct ControlChannel {
    connector: Arc<dyn Connector>,
    dispatcher: Arc<Dispatcher>,
    slot: Arc<ChannelSlot>,
    reconnect_delay: Duration,
}

impl ControlChannel {
    pub fn new(
        connector: Arc<dyn Connector>,
        dispatcher: Arc<Dispatcher>,
        reconnect_delay: Duration,
    ) -> Self {
        Self {
            connector,
            dispatcher,
            slot: Arc::new(ChannelSlot::new()),
            reconnect_delay,
        }
    }

    pub fn slot(&self) -> &Arc<ChannelSlot> {
        &self.slot
    }

    /// Send on the current connection; dropped with a warning when there is none.
    pub async fn send(&self, message: ProtocolMessage) {
        deliver(&self.slot, message).await;
    }

    /// Connect, serve, and reconnect until `shutdown` fires.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) {
        let endpoint = self.connector.endpoint().to_string();
        info!(endpoint = %endpoint, "Control channel starting");

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = self.connect_and_serve(&endpoint) => {}
            }

            info!(
                endpoint = %endpoint,
                delay_ms = self.reconnect_delay.as_millis() as u64,
                "Reconnecting after delay"
            );
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = tokio::time::sleep(self.reconnect_delay) => {}
            }
        }

        self.slot.clear();
        info!(endpoint = %endpoint, "Control channel stopped");
    }

    async fn connect_and_serve(&self, endpoint: &str) {
        match self.connector.connect().await {
            Ok(connection) => self.serve(endpoint, connection).await,
            Err(e) => error!(endpoint, error = %e, "Failed to connect"),
        }
    }

    async fn serve(&self, endpoint: &str, connection: Connection) {
        let Connection {
            outbound,
            mut inbound,
        } = connection;
        let generation = self.slot.acquire(outbound);
        info!(endpoint, generation, "Connected");

        while let Some(raw) = inbound.recv().await {
            debug!(generation, "Message received");
            let dispatcher = self.dispatcher.clone();
            let slot = self.slot.clone();
            tokio::spawn(async move {
                if let Some(response) = dispatcher.dispatch(raw).await {
                    deliver(&slot, response).await;
                }
            });
        }

        self.slot.release(generation);
        warn!(endpoint, generation, "Disconnected");
    }
}

async fn deliver(slot: &ChannelSlot, message: ProtocolMessage) {
    let id = message.id.clone();
    if let Err(e) = slot.send(message).await {
        warn!(id = %id, error = %e, "Dropping outgoing message");
    }
}
