// piiguard - PII Detection & Masking Engine
// Copyright (c) 2025 Piiguard Contributors
// Licensed under the MIT License

use clap::Parser;
use piiguard::cli::{Cli, Commands};
use piiguard::config::LoggingConfig;
use piiguard::log_error_with_context;
use piiguard::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console-only logging for the CLI; stdout carries masked output
    let log_level = cli.log_level.as_deref().unwrap_or("warn");
    let logging_config = LoggingConfig::default();
    let _guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "piiguard starting");

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Mask(args) => args.execute(&cli.config),
        Commands::Audit(args) => args.execute(&cli.config),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
    }
}
