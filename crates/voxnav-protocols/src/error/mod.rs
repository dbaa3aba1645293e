//! Error types for the voxnav protocol layer.

mod browser;
mod channel;
mod command;
mod page;
mod protocol;

pub use browser::*;
pub use channel::*;
pub use command::*;
pub use page::*;
pub use protocol::*;
