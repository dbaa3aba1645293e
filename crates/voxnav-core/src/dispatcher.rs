//! Incoming message dispatch.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use voxnav_protocols::{CommandError, IncomingKind, IncomingMessage, ProtocolMessage};

use crate::registry::CommandRegistry;

/// Maps one incoming JSON message to at most one response.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Handle a raw message. `None` means nothing is sent back.
    pub async fn dispatch(&self, raw: Value) -> Option<ProtocolMessage> {
        let message = match IncomingMessage::from_value(&raw) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Dropping malformed message");
                return None;
            }
        };

        match message.kind {
            IncomingKind::Ping => {
                debug!(id = %message.id, "Ping");
                Some(ProtocolMessage::pong(message.id))
            }
            IncomingKind::Command => self.execute(message).await,
            ref other => {
                warn!(id = %message.id, kind = ?other, "Ignoring message");
                None
            }
        }
    }

    async fn execute(&self, message: IncomingMessage) -> Option<ProtocolMessage> {
        let IncomingMessage { id, name, args, .. } = message;

        let Some(name) = name else {
            warn!(id = %id, "Dropping command without a name");
            return None;
        };

        debug!(id = %id, command = %name, "Executing command");
        let result = match self.registry.resolve(&name) {
            Some(descriptor) => descriptor.invoke(&args).await,
            None => Err(CommandError::UnknownCommand(name.clone())),
        };

        Some(match result {
            Ok(ack) => {
                debug!(id = %id, command = %name, ?ack, "Command acknowledged");
                ProtocolMessage::ack(id)
            }
            Err(e) => {
                warn!(id = %id, command = %name, error = %e, "Command failed");
                ProtocolMessage::error(id, e.to_string())
            }
        })
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
