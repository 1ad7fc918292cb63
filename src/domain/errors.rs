//! Domain error types
//!
//! This module defines the error hierarchy for piiguard. The detection
//! pipeline itself never fails; errors come from configuration, pattern
//! libraries, audit appends and the persisted audit sink.

use thiserror::Error;

/// Main piiguard error type
#[derive(Debug, Error)]
pub enum GuardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Rejected input to an audit append or policy setter
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Pattern library errors (bad regex, missing capture group, unknown category)
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Audit store errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A caller-supplied value that failed validation
///
/// Names the offending field so callers can surface it directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Field that failed validation
    pub field: &'static str,

    /// Why the value was rejected
    pub reason: String,
}

impl ValidationError {
    /// Creates a validation error for a required field that was not supplied
    pub fn missing(field: &'static str) -> Self {
        Self {
            field,
            reason: "required field is missing or blank".to_string(),
        }
    }

    /// Creates a validation error for a field holding an unacceptable value
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for GuardError {
    fn from(err: std::io::Error) -> Self {
        GuardError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        GuardError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for GuardError {
    fn from(err: toml::de::Error) -> Self {
        GuardError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<regex::Error> for GuardError {
    fn from(err: regex::Error) -> Self {
        GuardError::Pattern(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_error_display() {
        let err = GuardError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = ValidationError::missing("agent_id");
        assert_eq!(err.field, "agent_id");
        assert_eq!(
            err.to_string(),
            "agent_id: required field is missing or blank"
        );

        let source: &dyn std::error::Error = &err;
        assert_eq!(source.to_string(), err.to_string());

        let wrapped: GuardError = err.into();
        assert_eq!(
            wrapped.to_string(),
            "Validation error: agent_id: required field is missing or blank"
        );
        assert!(matches!(
            wrapped,
            GuardError::Validation(ValidationError { field: "agent_id", .. })
        ));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: GuardError = io_err.into();
        assert!(matches!(err, GuardError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: GuardError = json_err.into();
        assert!(matches!(err, GuardError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: GuardError = toml_err.into();
        assert!(matches!(err, GuardError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_regex_error_conversion() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: GuardError = regex_err.into();
        assert!(matches!(err, GuardError::Pattern(_)));
    }
}
