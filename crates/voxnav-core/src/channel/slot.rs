use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use voxnav_protocols::{ChannelError, ProtocolMessage};

struct Installed {
    generation: u64,
    outbound: mpsc::Sender<ProtocolMessage>,
}

/// The single live connection, tagged with a generation.
///
/// Installing a connection drops the previous outbound sender, which closes that
/// connection's writer. A stale holder's `release` cannot clear a newer connection.
pub struct ChannelSlot {
    current: Mutex<Option<Installed>>,
    generations: AtomicU64,
}

impl ChannelSlot {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
            generations: AtomicU64::new(0),
        }
    }

    /// Install `outbound`, releasing whatever was there. Returns its generation.
    pub fn acquire(&self, outbound: mpsc::Sender<ProtocolMessage>) -> u64 {
        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        let previous = self.current.lock().replace(Installed {
            generation,
            outbound,
        });
        if let Some(previous) = previous {
            debug!(
                previous = previous.generation,
                generation, "Replacing connection"
            );
        }
        generation
    }

    /// Clear the slot if it still holds `generation`.
    pub fn release(&self, generation: u64) -> bool {
        let mut current = self.current.lock();
        match current.as_ref() {
            Some(installed) if installed.generation == generation => {
                *current = None;
                true
            }
            _ => false,
        }
    }

    /// Clear the slot unconditionally.
    pub fn clear(&self) {
        self.current.lock().take();
    }

    pub fn is_connected(&self) -> bool {
        self.current.lock().is_some()
    }

    pub fn generation(&self) -> Option<u64> {
        self.current.lock().as_ref().map(|i| i.generation)
    }

    /// Queue `message` on the current connection.
    pub async fn send(&self, message: ProtocolMessage) -> Result<(), ChannelError> {
        let outbound = self
            .current
            .lock()
            .as_ref()
            .map(|i| i.outbound.clone())
            .ok_or(ChannelError::Disconnected)?;

        outbound
            .send(message)
            .await
            .map_err(|_| ChannelError::SendFailed("connection writer closed".to_string()))
    }
}

impl Default for ChannelSlot {
    fn default() -> Self {
        Self::new()
    }
}
