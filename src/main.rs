//! voxnav - voice-driven browser navigation.
//!
//! Main entry point for the voxnav CLI.

mod cli;
mod commands;

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use voxnav_config::{Config, ConfigLoader};

use cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Log files are written under `logging.dir` with daily rotation.
fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("voxnav")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes on drop; must outlive every log call.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// An explicit path must exist; the default one may be absent.
fn load_config(path: Option<&PathBuf>) -> Result<(PathBuf, Config), Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok((path.clone(), ConfigLoader::load(path)?)),
        None => {
            let path = Config::default_path();
            let config = ConfigLoader::load_or_default(&path)?;
            Ok((path, config))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let (path, config) = load_config(cli.config.as_ref())?;

    match cli.command {
        None => {
            init_tracing(&config)?;
            commands::run(config, None, None).await
        }
        Some(Commands::Run { cdp_endpoint, host }) => {
            init_tracing(&config)?;
            commands::run(config, cdp_endpoint, host).await
        }
        Some(Commands::CheckConfig) => commands::check_config(&config, &path),
        Some(Commands::HintLabel { indices, parse }) => {
            commands::hint_labels(&indices, parse.as_deref())
        }
    }
}
