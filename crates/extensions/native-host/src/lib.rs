//! Native messaging host connection for voxnav.
//!
//! The controller runs as a native messaging host: a child process spoken to over
//! its stdin/stdout, each message a 4-byte native-endian length followed by that
//! many bytes of UTF-8 JSON.
//!
//! - [`NativeMessageCodec`] - Frame codec for `tokio_util::codec`
//! - [`HostManifest`] / [`HostLaunch`] - Where the host executable lives
//! - [`NativeHostConnector`] - `Connector` that spawns the host

mod connector;
mod error;
mod framing;
mod manifest;

pub use connector::NativeHostConnector;
pub use error::{FramingError, ManifestError};
pub use framing::{NativeMessageCodec, DEFAULT_MAX_MESSAGE_BYTES};
pub use manifest::{default_manifest_dir, HostLaunch, HostManifest};
