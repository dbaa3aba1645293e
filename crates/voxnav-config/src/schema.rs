//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub channel: ChannelConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Native messaging host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Host name, used to locate `<name>.json` in the manifest directory.
    #[serde(default = "default_host_name")]
    pub name: String,

    /// Explicit executable; when set the manifest is not consulted.
    #[serde(default)]
    pub command: Option<String>,

    /// Extra arguments passed to an explicit `command`.
    #[serde(default)]
    pub args: Vec<String>,

    /// Directory holding host manifests (defaults to the per-user location).
    #[serde(default)]
    pub manifest_dir: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            name: default_host_name(),
            command: None,
            args: Vec::new(),
            manifest_dir: None,
        }
    }
}

fn default_host_name() -> String {
    "com.voxnav.voice_browser".to_string()
}

/// Control channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Delay before each reconnection attempt.
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,

    /// Largest accepted frame from the host.
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            reconnect_delay_ms: default_reconnect_delay_ms(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}

fn default_reconnect_delay_ms() -> u64 {
    3000
}

fn default_max_message_bytes() -> usize {
    1024 * 1024
}

/// Browser backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome DevTools HTTP endpoint.
    #[serde(default = "default_cdp_endpoint")]
    pub cdp_endpoint: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            cdp_endpoint: default_cdp_endpoint(),
        }
    }
}

fn default_cdp_endpoint() -> String {
    "http://127.0.0.1:9222".to_string()
}

/// Page runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Distance of a line scroll, in CSS pixels.
    #[serde(default = "default_scroll_step_px")]
    pub scroll_step_px: f64,

    /// Fraction of the viewport height covered by a page scroll.
    #[serde(default = "default_page_fraction")]
    pub page_fraction: f64,

    #[serde(default = "default_true")]
    pub smooth_scroll: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_step_px: default_scroll_step_px(),
            page_fraction: default_page_fraction(),
            smooth_scroll: true,
        }
    }
}

fn default_scroll_step_px() -> f64 {
    100.0
}

fn default_page_fraction() -> f64 {
    0.9
}

fn default_true() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for rolling log files.
    #[serde(default)]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `~/.voxnav`, or `.voxnav` when no home directory is known.
pub fn voxnav_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".voxnav"))
        .unwrap_or_else(|| PathBuf::from(".voxnav"))
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> PathBuf {
        voxnav_dir().join("config.toml")
    }

    /// Resolved log directory.
    pub fn log_dir(&self) -> PathBuf {
        match &self.logging.dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(dir).as_ref()),
            None => voxnav_dir().join("logs"),
        }
    }
}
