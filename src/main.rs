// file: src/main.rs
// version: 1.0.0
// guid: 4b3ddc1c-0b25-4dae-8eed-54bd60786a53

//! Transfer Bridge - Main entry point

use anyhow::Context;
use clap::Parser;
use transfer_bridge::{
    cli::{
        args::{Cli, Commands},
        commands::*,
    },
    config::loader::ConfigLoader,
    logging::{init_json_logger, init_logger, logger::with_async_operation_span},
    transfer::Tool,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { json_logs: true, .. } => init_json_logger()?,
        _ => init_logger(cli.verbose, cli.quiet)?,
    }

    let config = ConfigLoader::new()
        .discover(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve { bind, .. } => {
            with_async_operation_span("serve", || serve_command(config, bind))
                .await
                .context("Server failed")?;
        }
        Commands::Rsync { transfer } => {
            let code = transfer_command(config, Tool::Rsync, transfer, None).await;
            std::process::exit(code);
        }
        Commands::Rclone { transfer, config_path } => {
            let code = transfer_command(config, Tool::Rclone, transfer, config_path).await;
            std::process::exit(code);
        }
        Commands::CheckPrereqs { json } => {
            if !check_prerequisites_command(&config, json).await? {
                std::process::exit(1);
            }
        }
        Commands::Manifest => manifest_command()?,
    }

    Ok(())
}
