//! Control channel management.
//!
//! [`ChannelSlot`] holds the one live outbound queue. [`ControlChannel`] fills the
//! slot through a `Connector`, feeds inbound messages to the dispatcher, and on
//! disconnect empties the slot and reconnects after a fixed delay.

mod manager;
mod slot;

pub use manager::ControlChannel;
pub use slot::ChannelSlot;

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
