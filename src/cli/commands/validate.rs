//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the piiguard configuration file and its pattern library.

use crate::config::load_config;
use crate::masking::detector::PatternRegistry;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded and validated");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let pipeline = &config.masking.pipeline;
        let registry = match pipeline.pattern_library {
            Some(ref path) => PatternRegistry::with_overrides(path),
            None => PatternRegistry::default_patterns(),
        };
        let registry = match registry {
            Ok(r) => {
                println!("✅ Pattern library compiled");
                r
            }
            Err(e) => {
                println!("❌ Pattern library is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let policy = &config.masking.policy;
        let audit = &config.masking.audit;
        let categories: Vec<String> = registry
            .all_patterns()
            .map(|p| format!("{} ({})", p.category, p.name))
            .collect();

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Masking Enabled: {}", policy.enabled);
        println!("  Masking Level: {}", policy.level);
        println!(
            "  Pattern Library: {}",
            pipeline
                .pattern_library
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );
        println!("  Categories: {}", categories.join(", "));
        println!("  Consumed Span Tracking: {}", pipeline.track_consumed_spans);
        println!("  Record Detections: {}", audit.record_detections);
        println!("  Persist Audit Log: {}", audit.persist);
        if audit.persist {
            println!("  Audit Log Path: {}", audit.log_path.display());
        }
        match audit.retention_days {
            Some(days) => println!("  Retention: {days} day(s), applied by `audit prune`"),
            None => println!("  Retention: none"),
        }

        Ok(0)
    }
}
