//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GuardConfig;
use crate::domain::errors::GuardError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GuardConfig
/// 4. Applies environment variable overrides (PIIGUARD_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - An override holds an unparsable value
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use piiguard::config::loader::load_config;
///
/// let config = load_config("piiguard.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GuardConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GuardError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GuardError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: GuardConfig = toml::from_str(&contents)
        .map_err(|e| GuardError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(&mut config)?;
    Ok(config)
}

/// Loads configuration from a file if it exists, otherwise starts from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<GuardConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = GuardConfig::default();
    finish(&mut config)?;
    Ok(config)
}

fn finish(config: &mut GuardConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        GuardError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GuardError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    value
        .trim()
        .parse()
        .map_err(|_| GuardError::Configuration(format!("Invalid {name} value: {value}")))
}

/// Applies environment variable overrides using PIIGUARD_* prefix
///
/// Environment variables follow the pattern: PIIGUARD_<SECTION>_<KEY>
fn apply_env_overrides(config: &mut GuardConfig) -> Result<()> {
    if let Ok(val) = std::env::var("PIIGUARD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Policy overrides
    if let Ok(val) = std::env::var("PIIGUARD_POLICY_ENABLED") {
        config.masking.policy.enabled = parse_bool("PIIGUARD_POLICY_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("PIIGUARD_POLICY_LEVEL") {
        config.masking.policy.level = val.parse().map_err(|e| {
            GuardError::Configuration(format!("Invalid PIIGUARD_POLICY_LEVEL value: {e}"))
        })?;
    }

    // Pipeline overrides
    if let Ok(val) = std::env::var("PIIGUARD_PIPELINE_PATTERN_LIBRARY") {
        config.masking.pipeline.pattern_library = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("PIIGUARD_PIPELINE_TRACK_CONSUMED_SPANS") {
        config.masking.pipeline.track_consumed_spans =
            parse_bool("PIIGUARD_PIPELINE_TRACK_CONSUMED_SPANS", &val)?;
    }

    // Audit overrides
    if let Ok(val) = std::env::var("PIIGUARD_AUDIT_PERSIST") {
        config.masking.audit.persist = parse_bool("PIIGUARD_AUDIT_PERSIST", &val)?;
    }
    if let Ok(val) = std::env::var("PIIGUARD_AUDIT_LOG_PATH") {
        config.masking.audit.log_path = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("PIIGUARD_AUDIT_RETENTION_DAYS") {
        let days = val.trim().parse().map_err(|_| {
            GuardError::Configuration(format!("Invalid PIIGUARD_AUDIT_RETENTION_DAYS value: {val}"))
        })?;
        config.masking.audit.retention_days = Some(days);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("PIIGUARD_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
