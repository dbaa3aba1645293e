//! CLI definitions for voxnav.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// voxnav CLI.
#[derive(Parser)]
#[command(name = "voxnav")]
#[command(about = "Voice-driven browser navigation with keyboardless link hints")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.voxnav/config.toml)
    #[arg(short, long, global = true, env = "VOXNAV_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Connect to the browser and serve the controller until Ctrl-C (default)
    Run {
        /// Browser debugging endpoint, overrides `browser.cdp_endpoint`
        #[arg(long)]
        cdp_endpoint: Option<String>,

        /// Native messaging host name, overrides `host.name`
        #[arg(long)]
        host: Option<String>,
    },

    /// Load and validate the configuration file
    CheckConfig,

    /// Print the hint label for each index, or the index of a label
    HintLabel {
        /// Zero-based element indices
        #[arg(required_unless_present = "parse")]
        indices: Vec<usize>,

        /// Label to convert back to its index
        #[arg(long, conflicts_with = "indices")]
        parse: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["voxnav"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from([
            "voxnav",
            "--config",
            "/tmp/voxnav.toml",
            "run",
            "--cdp-endpoint",
            "http://127.0.0.1:9333",
            "--host",
            "com.example.voice",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/voxnav.toml")));
        match cli.command {
            Some(Commands::Run { cdp_endpoint, host }) => {
                assert_eq!(cdp_endpoint.as_deref(), Some("http://127.0.0.1:9333"));
                assert_eq!(host.as_deref(), Some("com.example.voice"));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_hint_label_args() {
        let cli = Cli::try_parse_from(["voxnav", "hint-label", "0", "26"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::HintLabel { ref indices, parse: None }) if indices == &[0, 26]
        ));

        let cli = Cli::try_parse_from(["voxnav", "hint-label", "--parse", "ab"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::HintLabel { parse: Some(ref label), .. }) if label == "ab"
        ));

        assert!(Cli::try_parse_from(["voxnav", "hint-label"]).is_err());
    }
}
