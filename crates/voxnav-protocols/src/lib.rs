//! # voxnav Protocols
//!
//! Wire message definitions and collaborator traits shared by every voxnav crate.
//! Contains only types and interfaces - no implementations.
//!
//! ## Core Traits
//!
//! - [`Browser`] - Tab and window primitives (navigate, create, close, activate)
//! - [`PageTransport`] - Delivery of page-level commands to a tab's page runtime
//! - [`Connector`] - Opens the control channel to the controller

pub mod browser;
pub mod channel;
pub mod command;
pub mod error;
pub mod message;
pub mod page;

pub use browser::{Browser, Tab, TabId, TabQuery};
pub use channel::{Connection, Connector};
pub use command::{Ack, CommandArgs, CommandScope, PageCommand};
pub use error::{
    BrowserError, ChannelError, CommandError, PageError, ProtocolError, TransportError,
};
pub use message::{AckValue, IncomingKind, IncomingMessage, MessageId, MessageKind, ProtocolMessage};
pub use page::{PageRequest, PageResponse, PageTransport};
