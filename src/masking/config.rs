//! Masking configuration

use crate::masking::policy::MaskingLevel;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Policy, pipeline and audit sections of the configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaskingConfig {
    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub audit: AuditConfig,
}

impl MaskingConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.pipeline.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

/// Initial masking policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Whether callers should mask at startup
    #[serde(default)]
    pub enabled: bool,

    /// Declared sensitivity level
    #[serde(default)]
    pub level: MaskingLevel,
}

/// Detector pipeline settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pattern library TOML layered over the built-in patterns
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// Skip matches overlapping text an earlier rule already masked
    #[serde(default)]
    pub track_consumed_spans: bool,
}

impl PipelineConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                return Err(format!("Pattern library file not found: {}", path.display()));
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(format!(
                    "Pattern library must be a TOML file: {}",
                    path.display()
                ));
            }
        }
        Ok(())
    }
}

/// Audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Append one log entry per detection when the engine masks
    #[serde(default = "default_record_detections")]
    pub record_detections: bool,

    /// Mirror the log to `log_path` and restore it on startup
    #[serde(default)]
    pub persist: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON lines (required for restore)
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,

    /// Age after which `audit prune` evicts entries (never automatic)
    #[serde(default)]
    pub retention_days: Option<u32>,

    /// Agent recorded when the caller does not name one
    #[serde(default = "default_agent_id")]
    pub default_agent_id: String,
}

fn default_record_detections() -> bool {
    true
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/masking.jsonl")
}

fn default_audit_json_format() -> bool {
    true
}

fn default_agent_id() -> String {
    "system".to_string()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            record_detections: default_record_detections(),
            persist: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
            retention_days: None,
            default_agent_id: default_agent_id(),
        }
    }
}

impl AuditConfig {
    /// Retention window, if one is configured
    pub fn retention(&self) -> Option<Duration> {
        self.retention_days.map(|days| Duration::days(i64::from(days)))
    }

    fn validate(&self) -> Result<(), String> {
        if self.retention_days == Some(0) {
            return Err("audit.retention_days must be greater than 0".to_string());
        }
        if self.default_agent_id.trim().is_empty() {
            return Err("audit.default_agent_id cannot be empty".to_string());
        }
        if self.persist && !self.json_format {
            return Err(
                "audit.json_format must be true when audit.persist is enabled".to_string(),
            );
        }
        Ok(())
    }
}
