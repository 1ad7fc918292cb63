//! Configuration management for piiguard.
//!
//! TOML configuration with `${VAR_NAME}` substitution, `PIIGUARD_*`
//! environment overrides, defaults for every setting, and validation on load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use piiguard::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("piiguard.toml")?;
//! println!("Masking enabled: {}", config.masking.policy.enabled);
//! println!("Level: {}", config.masking.policy.level);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [policy]
//! enabled = true
//! level = "basic"
//!
//! [pipeline]
//! track_consumed_spans = false
//!
//! [audit]
//! persist = true
//! log_path = "./audit/masking.jsonl"
//! retention_days = 30
//!
//! [logging]
//! local_enabled = false
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, GuardConfig, LoggingConfig};
