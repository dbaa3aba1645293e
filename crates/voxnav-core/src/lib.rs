//! # voxnav Core
//!
//! Control-side plumbing between the controller and the browser.
//!
//! ## Components
//!
//! - [`ControlChannel`] - Owns the connection to the controller and reconnects
//! - [`Dispatcher`] - Turns incoming messages into `ack` / `error` responses
//! - [`CommandRegistry`] - Typed command descriptors and their handlers
//! - [`ContentBridge`] - Forwards page-level commands to the active tab
//!
//! ```text
//! Connector ─► ControlChannel ─► Dispatcher ─► CommandRegistry ─┬─► Browser
//!                    ▲                                          └─► ContentBridge ─► PageTransport
//!                    └──────────── ack / error ◄────────────────────────┘
//! ```

pub mod bridge;
pub mod channel;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod shutdown;

#[cfg(test)]
mod test_support;

pub use bridge::ContentBridge;
pub use channel::{ChannelSlot, ControlChannel};
pub use dispatcher::Dispatcher;
pub use error::RegistryError;
pub use registry::{CommandDescriptor, CommandHandler, CommandRegistry, RequiredArg};
pub use shutdown::ShutdownSignal;
