//! Command handlers.
//!
//! Browser-level handlers act on the `Browser` directly. Commands that need an
//! active tab skip quietly when there is none; the dispatcher still acks them.

mod navigation;
mod page;
mod tabs;

pub use navigation::{History, HistoryAction};
pub use page::ForwardToPage;
pub use tabs::{CloseTab, CycleTab, FocusAddress, NewTab, OpenUrl};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
