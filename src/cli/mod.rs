//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for piiguard using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// piiguard - PII detection and masking
#[derive(Parser, Debug)]
#[command(name = "piiguard")]
#[command(version, about, long_about = None)]
#[command(author = "Piiguard Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "piiguard.toml", env = "PIIGUARD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PIIGUARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mask PII in text read from stdin or a file
    Mask(commands::mask::MaskArgs),

    /// Inspect or prune the persisted audit log
    Audit(commands::audit::AuditArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
