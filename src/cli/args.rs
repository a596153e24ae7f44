// file: src/cli/args.rs
// version: 1.0.0
// guid: 75cdb7cd-4cc7-4fc2-bf99-8fe0e452f7bf

//! Command line argument definitions

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;

#[derive(Parser)]
#[command(name = "transfer-bridge")]
#[command(about = "Run rsync and rclone transfers over HTTP or from the command line")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (YAML or TOML)
    #[arg(short, long, global = true, env = "TRANSFER_BRIDGE_CONFIG")]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve POST /rsync/run and POST /rclone/run
    Serve {
        #[arg(short, long, help = "Address to listen on (overrides server.bind)")]
        bind: Option<SocketAddr>,

        #[arg(long, help = "Emit logs as JSON lines")]
        json_logs: bool,
    },

    /// Run rsync once and exit with its return code
    Rsync {
        #[command(flatten)]
        transfer: TransferArgs,
    },

    /// Run rclone once and exit with its return code
    Rclone {
        #[command(flatten)]
        transfer: TransferArgs,

        #[arg(long, help = "Path to rclone.conf")]
        config_path: Option<String>,
    },

    /// Report which of rsync, rclone and wsl are on PATH
    CheckPrereqs {
        #[arg(short, long)]
        json: bool,
    },

    /// Print the host extension manifest as JSON
    Manifest,
}

/// Arguments shared by the one-shot transfer commands
#[derive(Args, Debug, Clone)]
pub struct TransferArgs {
    pub source: String,

    pub destination: String,

    #[arg(
        short,
        long,
        allow_hyphen_values = true,
        help = "Tool flags as one string, e.g. \"-avz --delete\""
    )]
    pub flags: Option<String>,

    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Run the tool through WSL")]
    pub wsl: bool,

    #[arg(short, long, help = "Timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(
        short,
        long = "env",
        value_name = "KEY=VALUE",
        value_parser = parse_env_pair,
        help = "Extra environment variable for the tool (repeatable)"
    )]
    pub env: Vec<(String, String)>,
}

fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rsync_with_hyphenated_flags() {
        let cli = Cli::try_parse_from([
            "transfer-bridge",
            "rsync",
            "/src/",
            "/dst",
            "--flags",
            "-a --delete",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Rsync { transfer } => {
                assert_eq!(transfer.flags.as_deref(), Some("-a --delete"));
                assert!(transfer.dry_run);
                assert!(!transfer.wsl);
            }
            _ => panic!("expected rsync command"),
        }
    }

    #[test]
    fn test_parse_env_pairs() {
        let cli = Cli::try_parse_from([
            "transfer-bridge",
            "rsync",
            "/src/",
            "host::module",
            "-e",
            "RSYNC_PASSWORD=a=b",
            "--env",
            "EMPTY=",
        ])
        .unwrap();

        match cli.command {
            Commands::Rsync { transfer } => {
                assert_eq!(
                    transfer.env,
                    vec![
                        ("RSYNC_PASSWORD".to_string(), "a=b".to_string()),
                        ("EMPTY".to_string(), String::new()),
                    ]
                );
            }
            _ => panic!("expected rsync command"),
        }

        assert!(Cli::try_parse_from(["transfer-bridge", "rsync", "a", "b", "-e", "NOEQUALS"]).is_err());
        assert!(Cli::try_parse_from(["transfer-bridge", "rsync", "a", "b", "-e", "=x"]).is_err());
    }

    #[test]
    fn test_parse_rclone_config_path() {
        let cli = Cli::try_parse_from([
            "transfer-bridge",
            "rclone",
            "/src",
            "remote:dst",
            "--config-path",
            "~/rclone.conf",
        ])
        .unwrap();

        match cli.command {
            Commands::Rclone { config_path, .. } => {
                assert_eq!(config_path.as_deref(), Some("~/rclone.conf"));
            }
            _ => panic!("expected rclone command"),
        }
    }
}
