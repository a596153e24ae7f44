// file: src/cli/commands.rs
// version: 1.0.0
// guid: f0682910-5853-4f34-9825-d8c69c739563

//! Command implementations for the CLI

use super::args::TransferArgs;
use crate::{
    config::BridgeConfig,
    extension,
    server,
    transfer::{find_executable, Flags, Tool, TransferRunner, TransferSpec},
    Result,
};
use serde::Serialize;
use std::net::SocketAddr;
use tracing::{info, warn};

/// Run the HTTP server until Ctrl+C
pub async fn serve_command(config: BridgeConfig, bind: Option<SocketAddr>) -> Result<()> {
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        warn!("Received Ctrl+C, shutting down");
    };

    server::serve(config, bind, shutdown).await
}

/// Run one transfer, print its output and return the exit code to use
pub async fn transfer_command(
    config: BridgeConfig,
    tool: Tool,
    args: TransferArgs,
    config_path: Option<String>,
) -> i32 {
    let spec = TransferSpec {
        tool,
        source: args.source,
        destination: args.destination,
        flags: args.flags.map(Flags::Line),
        dry_run: args.dry_run,
        use_wsl: args.wsl,
        config_path,
        env: (!args.env.is_empty()).then(|| args.env.into_iter().collect()),
    };

    let runner = TransferRunner::new(config);
    match runner.run(&spec, args.timeout).await {
        Ok(outcome) => {
            print!("{}", outcome.output);
            outcome.return_code
        }
        Err(e) => {
            let partial = e.partial_output();
            if !partial.is_empty() {
                print!("{}", partial);
            }
            println!("Error: {}", e);
            1
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PrereqStatus {
    pub name: String,
    pub path: Option<String>,
    /// What stops working when this program is missing
    pub needed_for: &'static str,
}

/// Report which external programs are available.
///
/// Each program is optional on its own; the result is `false` only when
/// neither rsync nor rclone can be found.
pub async fn check_prerequisites_command(config: &BridgeConfig, json: bool) -> Result<bool> {
    let checks = [
        (config.rsync.binary.as_str(), "/rsync/run"),
        (config.rclone.binary.as_str(), "/rclone/run"),
        (config.execution.wsl_launcher.as_str(), "use_wsl"),
    ];

    let statuses: Vec<PrereqStatus> = checks
        .into_iter()
        .map(|(name, needed_for)| PrereqStatus {
            name: name.to_string(),
            path: find_executable(name).map(|p| p.display().to_string()),
            needed_for,
        })
        .collect();

    let usable = statuses[..2].iter().any(|s| s.path.is_some());

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
    } else {
        for status in &statuses {
            match &status.path {
                Some(path) => println!("✓ {} ({})", status.name, path),
                None => println!("- {} not found (needed for {})", status.name, status.needed_for),
            }
        }
    }

    if !usable {
        warn!("Neither rsync nor rclone was found on PATH");
    } else if statuses.iter().all(|s| s.path.is_some()) {
        info!("All prerequisites satisfied");
    } else {
        info!("At least one transfer tool is available");
    }

    Ok(usable)
}

/// Print the extension manifest
pub fn manifest_command() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&extension::manifest())?);
    Ok(())
}
