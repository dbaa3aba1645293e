//! Control channel message definitions.
//!
//! Every message exchanged with the native host is a single JSON object:
//!
//! ```text
//! { "type": "command" | "ping" | "ack" | "error",
//!   "id": <opaque>, "name"?: string, "args"?: object, "ok"?: bool | string, "message"?: string }
//! ```
//!
//! Outgoing messages are built with [`ProtocolMessage`]. Incoming messages arrive as
//! raw JSON and are validated into an [`IncomingMessage`] so that a message with no
//! usable `type` can be dropped without guessing at a correlation id.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ProtocolError;

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// Opaque request identifier, echoed back verbatim in the matching ack/error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub Value);

impl MessageId {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// Message type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Command,
    Ping,
    Ack,
    Error,
}

/// Value of the `ok` field of an ack.
///
/// Command acks carry `true`, ping acks carry the string `"pong"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AckValue {
    Flag(bool),
    Text(String),
}

/// A protocol message as written to the control channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<AckValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProtocolMessage {
    /// Successful command acknowledgment: `{type:"ack", id, ok:true}`.
    pub fn ack(id: MessageId) -> Self {
        Self::ack_with(id, AckValue::Flag(true))
    }

    /// Ping reply: `{type:"ack", id, ok:"pong"}`.
    pub fn pong(id: MessageId) -> Self {
        Self::ack_with(id, AckValue::Text("pong".to_string()))
    }

    fn ack_with(id: MessageId, ok: AckValue) -> Self {
        Self {
            kind: MessageKind::Ack,
            id,
            name: None,
            args: None,
            ok: Some(ok),
            message: None,
        }
    }

    /// Failure response: `{type:"error", id, message}`.
    pub fn error(id: MessageId, message: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            id,
            name: None,
            args: None,
            ok: None,
            message: Some(message.into()),
        }
    }

    /// A command request (as sent by a controller).
    pub fn command(id: MessageId, name: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            kind: MessageKind::Command,
            id,
            name: Some(name.into()),
            args: Some(args),
            ok: None,
            message: None,
        }
    }

    /// A ping request.
    pub fn ping(id: MessageId) -> Self {
        Self {
            kind: MessageKind::Ping,
            id,
            name: None,
            args: None,
            ok: None,
            message: None,
        }
    }

    pub fn to_value(&self) -> Result<Value, ProtocolError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Classified type of an incoming message.
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingKind {
    Command,
    Ping,
    Ack,
    Error,
    /// Any other type string (e.g. a host's `ready` announcement).
    Other(String),
}

/// A validated incoming message.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    pub kind: IncomingKind,
    pub id: MessageId,
    pub name: Option<String>,
    pub args: Map<String, Value>,
}

impl IncomingMessage {
    /// Validate a raw JSON value received from the channel.
    ///
    /// Fails only when the value is not an object or has no string `type`.
    /// A missing `id` becomes `null`, missing or non-object `args` become empty.
    pub fn from_value(raw: &Value) -> Result<Self, ProtocolError> {
        let obj = raw
            .as_object()
            .ok_or_else(|| ProtocolError::Malformed("message is not a JSON object".to_string()))?;

        let kind = match obj.get("type").and_then(Value::as_str) {
            Some("command") => IncomingKind::Command,
            Some("ping") => IncomingKind::Ping,
            Some("ack") => IncomingKind::Ack,
            Some("error") => IncomingKind::Error,
            Some("") | None => {
                return Err(ProtocolError::Malformed("missing message type".to_string()));
            }
            Some(other) => IncomingKind::Other(other.to_string()),
        };

        let id = MessageId(obj.get("id").cloned().unwrap_or(Value::Null));
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        let args = obj
            .get("args")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Ok(Self { kind, id, name, args })
    }
}
