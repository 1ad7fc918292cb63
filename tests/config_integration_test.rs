//! Integration tests for configuration loading and validation
//!
//! Every test here holds ENV_MUTEX, since PIIGUARD_* overrides apply to
//! all loads in the process.

use piiguard::config::{load_config, load_config_or_default};
use piiguard::masking::MaskingLevel;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const OVERRIDE_VARS: &[&str] = &[
    "PIIGUARD_APPLICATION_LOG_LEVEL",
    "PIIGUARD_POLICY_ENABLED",
    "PIIGUARD_POLICY_LEVEL",
    "PIIGUARD_PIPELINE_PATTERN_LIBRARY",
    "PIIGUARD_PIPELINE_TRACK_CONSUMED_SPANS",
    "PIIGUARD_AUDIT_PERSIST",
    "PIIGUARD_AUDIT_LOG_PATH",
    "PIIGUARD_AUDIT_RETENTION_DAYS",
    "PIIGUARD_LOGGING_LOCAL_ENABLED",
    "PIIGUARD_LOGGING_LOCAL_PATH",
];

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in OVERRIDE_VARS {
        std::env::remove_var(var);
    }
    std::env::remove_var("TEST_PIIGUARD_AGENT");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[policy]
enabled = true
level = "enhanced"

[pipeline]
track_consumed_spans = true

[audit]
record_detections = false
persist = true
log_path = "/tmp/piiguard-test/masking.jsonl"
json_format = true
retention_days = 14
default_agent_id = "chatbot"

[logging]
local_enabled = false
local_path = "/tmp/piiguard-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");

    let masking = &config.masking;
    assert!(masking.policy.enabled);
    assert_eq!(masking.policy.level, MaskingLevel::Enhanced);
    assert!(masking.pipeline.pattern_library.is_none());
    assert!(masking.pipeline.track_consumed_spans);
    assert!(!masking.audit.record_detections);
    assert!(masking.audit.persist);
    assert_eq!(
        masking.audit.log_path,
        PathBuf::from("/tmp/piiguard-test/masking.jsonl")
    );
    assert_eq!(masking.audit.retention_days, Some(14));
    assert_eq!(masking.audit.default_agent_id, "chatbot");

    assert_eq!(config.logging.local_path, "/tmp/piiguard-logs");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_empty_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config("");
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert!(!config.masking.policy.enabled);
    assert_eq!(config.masking.policy.level, MaskingLevel::Basic);
    assert!(!config.masking.pipeline.track_consumed_spans);
    assert!(config.masking.audit.record_detections);
    assert!(!config.masking.audit.persist);
    assert!(config.masking.audit.retention_days.is_none());
    assert_eq!(config.masking.audit.default_agent_id, "system");
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_missing_file_is_error_unless_defaults_requested() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let path = "/nonexistent/piiguard.toml";
    assert!(load_config(path).is_err());

    let config = load_config_or_default(path).expect("defaults should load");
    assert!(!config.masking.policy.enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_PIIGUARD_AGENT", "ops-bot");

    let temp_file = write_config(
        r#"
[audit]
default_agent_id = "${TEST_PIIGUARD_AGENT}"
"#,
    );
    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(config.masking.audit.default_agent_id, "ops-bot");

    std::env::remove_var("TEST_PIIGUARD_AGENT");
    assert!(load_config(temp_file.path()).is_err());
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("PIIGUARD_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("PIIGUARD_POLICY_ENABLED", "true");
    std::env::set_var("PIIGUARD_POLICY_LEVEL", "maximum");
    std::env::set_var("PIIGUARD_AUDIT_RETENTION_DAYS", "7");
    std::env::set_var("PIIGUARD_AUDIT_LOG_PATH", "/var/tmp/masking.jsonl");

    let temp_file = write_config(
        r#"
[application]
log_level = "info"

[policy]
enabled = false
level = "basic"
"#,
    );
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.expect("Failed to load config");
    assert_eq!(config.application.log_level, "trace");
    assert!(config.masking.policy.enabled);
    assert_eq!(config.masking.policy.level, MaskingLevel::Maximum);
    assert_eq!(config.masking.audit.retention_days, Some(7));
    assert_eq!(
        config.masking.audit.log_path,
        PathBuf::from("/var/tmp/masking.jsonl")
    );
}

#[test]
fn test_invalid_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("PIIGUARD_POLICY_LEVEL", "paranoid");

    let result = load_config_or_default("/nonexistent/piiguard.toml");
    cleanup_env_vars();

    assert!(result.is_err());
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"loud\"\n",
        "[policy]\nlevel = \"paranoid\"\n",
        "[audit]\nretention_days = 0\n",
        "[audit]\ndefault_agent_id = \"  \"\n",
        "[audit]\npersist = true\njson_format = false\n",
        "[pipeline]\npattern_library = \"/nonexistent/custom.toml\"\n",
        "[logging]\nlocal_rotation = \"size\"\n",
    ] {
        let temp_file = write_config(contents);
        assert!(
            load_config(temp_file.path()).is_err(),
            "accepted invalid config: {contents}"
        );
    }
}
