// pii-xref - Dutch PII Detection and Cross-Reference
// Copyright (c) 2025 pii-xref Contributors
// Licensed under the MIT License

use clap::Parser;
use pii_xref::cli::{Cli, Commands};
use pii_xref::config::{load_config_or_default, LoggingConfig};
use pii_xref::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging follows the configuration; a broken configuration is reported
    // by the command itself
    let config = load_config_or_default(cli.config.as_deref()).ok();
    let logging_config = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(LoggingConfig::default);
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "pii-xref");

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Scan(args) => args.execute(config).await,
        Commands::Xref(args) => args.execute(config).await,
        Commands::Recognizers(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(config).await,
    }
}
