//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "piiguard.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set [policy] enabled = true to start masking");
                println!("  2. Set [audit] persist = true to keep the audit log between runs");
                println!("  3. Run: piiguard --config {} validate-config", self.output);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to create configuration file: {e}");
                Ok(5)
            }
        }
    }

    /// Default configuration with every setting spelled out
    pub fn generate_config() -> String {
        r#"# piiguard configuration

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[policy]
# Callers mask only while this is true
enabled = false
# Declared sensitivity: basic, enhanced, maximum
level = "basic"

[pipeline]
# Optional TOML library overriding or disabling built-in patterns
# pattern_library = "patterns/custom.toml"
# Skip matches that overlap text an earlier rule already masked
track_consumed_spans = false

[audit]
# Append one log entry per detection
record_detections = true
# Mirror the log to log_path and restore it on startup
persist = false
log_path = "./audit/masking.jsonl"
json_format = true
# Evicted by `piiguard audit prune`, never automatically
# retention_days = 30
default_agent_id = "system"

[logging]
local_enabled = false
local_path = "./logs"
# daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GuardConfig;

    #[test]
    fn test_generated_config_parses_and_validates() {
        let config: GuardConfig = toml::from_str(&InitArgs::generate_config()).unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.masking.policy.enabled);
        assert_eq!(config.masking.audit.default_agent_id, "system");
    }
}
