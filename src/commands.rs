//! Subcommand implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use voxnav_browser_cdp::{CdpBrowser, CdpPageTransport};
use voxnav_config::{Config, ConfigLoader, ConfigValidator, HostConfig, PageConfig};
use voxnav_core::{CommandRegistry, ContentBridge, ControlChannel, Dispatcher, ShutdownSignal};
use voxnav_native_host::{HostLaunch, ManifestError, NativeHostConnector};
use voxnav_page_hints::{hint_label, label_index, ScrollSettings};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Connect to the browser and the controller, then serve until Ctrl-C.
pub(crate) async fn run(
    mut config: Config,
    cdp_endpoint: Option<String>,
    host: Option<String>,
) -> CmdResult {
    if let Some(endpoint) = cdp_endpoint {
        config.browser.cdp_endpoint = endpoint;
    }
    if let Some(name) = host {
        config.host.name = name;
    }
    reject_invalid(&config)?;

    info!("Starting voxnav v{}", env!("CARGO_PKG_VERSION"));

    let browser = Arc::new(CdpBrowser::connect(&config.browser.cdp_endpoint).await?);
    let transport = Arc::new(CdpPageTransport::new(
        browser.clone(),
        scroll_settings(&config.page),
    ));
    let bridge = Arc::new(ContentBridge::new(browser.clone(), transport));
    let registry = Arc::new(CommandRegistry::with_defaults(browser, bridge)?);
    info!(commands = registry.len(), "Command registry ready");
    let dispatcher = Arc::new(Dispatcher::new(registry));

    let connector = Arc::new(
        NativeHostConnector::new(host_launch(&config.host)?)
            .with_max_message_bytes(config.channel.max_message_bytes),
    );
    let launch = connector.launch();
    info!(host = %launch.name, program = %launch.program.display(), "Native host resolved");

    let channel = Arc::new(ControlChannel::new(
        connector,
        dispatcher,
        Duration::from_millis(config.channel.reconnect_delay_ms),
    ));

    let shutdown = ShutdownSignal::new();
    let runner = {
        let channel = channel.clone();
        let rx = shutdown.subscribe();
        tokio::spawn(async move { channel.run(rx).await })
    };

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down..."),
        Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
    }
    shutdown.trigger();
    runner.await?;

    info!("voxnav stopped");
    Ok(())
}

/// Print validation results; fail when there are errors.
pub(crate) fn check_config(config: &Config, path: &Path) -> CmdResult {
    let result = ConfigValidator::validate(config);

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for err in &result.errors {
        println!("error: {}: {}", err.path, err.message);
    }

    if result.is_valid() {
        println!("{}: OK", path.display());
        Ok(())
    } else {
        Err(format!("{}: {} error(s)", path.display(), result.errors.len()).into())
    }
}

pub(crate) fn hint_labels(indices: &[usize], parse: Option<&str>) -> CmdResult {
    if let Some(label) = parse {
        let index = label_index(label).ok_or_else(|| format!("Not a hint label: {:?}", label))?;
        println!("{}", index);
        return Ok(());
    }

    for &index in indices {
        println!("{}\t{}", index, hint_label(index));
    }
    Ok(())
}

fn reject_invalid(config: &Config) -> CmdResult {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }
    match result.errors.first() {
        Some(first) => Err(format!("Invalid configuration: {}: {}", first.path, first.message).into()),
        None => Ok(()),
    }
}

pub(crate) fn scroll_settings(page: &PageConfig) -> ScrollSettings {
    ScrollSettings {
        line_step: page.scroll_step_px,
        page_fraction: page.page_fraction,
        smooth: page.smooth_scroll,
    }
}

pub(crate) fn host_launch(host: &HostConfig) -> Result<HostLaunch, ManifestError> {
    match &host.command {
        Some(command) => Ok(HostLaunch::command(
            host.name.clone(),
            ConfigLoader::expand_path(command),
            host.args.clone(),
        )),
        None => {
            let dir = host
                .manifest_dir
                .as_deref()
                .map(|d| PathBuf::from(ConfigLoader::expand_path(d)));
            HostLaunch::from_manifest(&host.name, dir.as_deref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_settings_from_config() {
        let page = PageConfig {
            scroll_step_px: 40.0,
            page_fraction: 0.5,
            smooth_scroll: false,
        };
        let settings = scroll_settings(&page);
        assert_eq!(settings.line_step, 40.0);
        assert_eq!(settings.page_fraction, 0.5);
        assert!(!settings.smooth);
    }

    #[test]
    fn test_explicit_host_command() {
        let host = HostConfig {
            command: Some("/opt/voice/host".to_string()),
            args: vec!["--quiet".to_string()],
            ..HostConfig::default()
        };
        let launch = host_launch(&host).unwrap();
        assert_eq!(launch.program, PathBuf::from("/opt/voice/host"));
        assert_eq!(launch.args, vec!["--quiet".to_string()]);
        assert_eq!(launch.name, host.name);
    }

    #[test]
    fn test_host_command_expands_home() {
        let host = HostConfig {
            command: Some("~/bin/voice-host".to_string()),
            ..HostConfig::default()
        };
        let launch = host_launch(&host).unwrap();
        assert!(!launch.program.starts_with("~"));
        assert!(launch.program.ends_with("bin/voice-host"));
    }

    #[test]
    fn test_host_from_manifest_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("com.example.voice.json"),
            r#"{
                "name": "com.example.voice",
                "description": "voice host",
                "path": "/usr/local/bin/voice-host",
                "type": "stdio",
                "allowed_extensions": []
            }"#,
        )
        .unwrap();

        let host = HostConfig {
            name: "com.example.voice".to_string(),
            manifest_dir: Some(dir.path().display().to_string()),
            ..HostConfig::default()
        };
        let launch = host_launch(&host).unwrap();
        assert_eq!(launch.program, PathBuf::from("/usr/local/bin/voice-host"));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let host = HostConfig {
            manifest_dir: Some(dir.path().display().to_string()),
            ..HostConfig::default()
        };
        assert!(matches!(host_launch(&host), Err(ManifestError::NotFound(_))));
    }

    #[test]
    fn test_hint_label_parse_rejects_garbage() {
        assert!(hint_labels(&[], Some("a1")).is_err());
        assert!(hint_labels(&[0, 27], None).is_ok());
    }
}
