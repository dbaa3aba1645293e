//! Chrome DevTools Protocol backend for voxnav.
//!
//! Drives a Chromium-based browser started with remote debugging:
//!
//! ```bash
//! chromium --remote-debugging-port=9222
//! ```
//!
//! - [`CdpBrowser`] - `Browser` over `Target.*`, history and reload per page session
//! - [`CdpDocument`] - `Document` over `Runtime.evaluate`
//! - [`CdpPageTransport`] - `PageTransport` running one `PageRuntime` per tab

pub mod cdp;
mod browser;
mod document;
mod scripts;
mod transport;

pub use browser::CdpBrowser;
pub use cdp::{CdpClient, CdpError, PageSession};
pub use document::CdpDocument;
pub use transport::CdpPageTransport;
