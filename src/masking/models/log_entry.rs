//! Audit log entry models

use super::pii::{Detection, LogCategory};
use crate::domain::errors::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One immutable audit record of a masking action
///
/// Only the audit store creates these. `id` and `timestamp` are assigned at
/// append time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskingLogEntry {
    id: Uuid,
    timestamp: DateTime<Utc>,
    original_category: LogCategory,
    masked_value: String,
    context: String,
    agent_id: String,
}

impl MaskingLogEntry {
    pub(crate) fn from_validated(
        entry: ValidatedEntry,
        id: Uuid,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            timestamp,
            original_category: entry.category,
            masked_value: entry.masked_value,
            context: entry.context,
            agent_id: entry.agent_id,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn original_category(&self) -> LogCategory {
        self.original_category
    }

    pub fn masked_value(&self) -> &str {
        &self.masked_value
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }
}

/// Caller-supplied fields for an audit append
///
/// Everything except `id` and `timestamp`. `category`, `masked_value` and
/// `agent_id` are required; `context` may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLogEntry {
    pub category: Option<LogCategory>,
    pub masked_value: String,
    pub context: String,
    pub agent_id: String,
}

impl NewLogEntry {
    /// Create an entry with every required field set
    pub fn new(
        category: LogCategory,
        masked_value: impl Into<String>,
        context: impl Into<String>,
        agent_id: impl Into<String>,
    ) -> Self {
        Self {
            category: Some(category),
            masked_value: masked_value.into(),
            context: context.into(),
            agent_id: agent_id.into(),
        }
    }

    /// Translate a pipeline detection into an audit entry
    ///
    /// Only the masked value is carried over.
    pub fn from_detection(
        detection: &Detection,
        context: impl Into<String>,
        agent_id: impl Into<String>,
    ) -> Self {
        Self::new(
            detection.category().into(),
            detection.masked(),
            context,
            agent_id,
        )
    }

    pub(crate) fn validate(self) -> Result<ValidatedEntry, ValidationError> {
        let category = self
            .category
            .ok_or_else(|| ValidationError::missing("original_category"))?;
        if self.masked_value.trim().is_empty() {
            return Err(ValidationError::missing("masked_value"));
        }
        if self.agent_id.trim().is_empty() {
            return Err(ValidationError::missing("agent_id"));
        }
        Ok(ValidatedEntry {
            category,
            masked_value: self.masked_value,
            context: self.context,
            agent_id: self.agent_id,
        })
    }
}

/// A [`NewLogEntry`] that passed validation
#[derive(Debug)]
pub(crate) struct ValidatedEntry {
    category: LogCategory,
    masked_value: String,
    context: String,
    agent_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::models::PiiCategory;

    #[test]
    fn test_missing_category_rejected() {
        let entry = NewLogEntry {
            category: None,
            masked_value: "010-****-5678".to_string(),
            context: String::new(),
            agent_id: "agent-1".to_string(),
        };
        let err = entry.validate().unwrap_err();
        assert_eq!(err.field, "original_category");
    }

    #[test]
    fn test_blank_agent_rejected() {
        let entry = NewLogEntry::new(LogCategory::Name, "J*** D**", "manual", "   ");
        assert_eq!(entry.validate().unwrap_err().field, "agent_id");
    }

    #[test]
    fn test_blank_masked_value_rejected() {
        let entry = NewLogEntry::new(LogCategory::Email, "", "chat", "agent-1");
        assert_eq!(entry.validate().unwrap_err().field, "masked_value");
    }

    #[test]
    fn test_empty_context_allowed() {
        let entry = NewLogEntry::new(LogCategory::Card, "****-****-****-3456", "", "agent-1");
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_from_detection_carries_masked_value_only() {
        let detection = Detection::new(
            PiiCategory::Passport,
            "M12345678".to_string(),
            "M****5678".to_string(),
        );
        let entry = NewLogEntry::from_detection(&detection, "outbound chat", "agent-7");
        assert_eq!(entry.category, Some(LogCategory::Passport));
        assert_eq!(entry.masked_value, "M****5678");
        assert_eq!(entry.agent_id, "agent-7");
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let validated = NewLogEntry::new(LogCategory::Phone, "010-****-5678", "chat", "a1")
            .validate()
            .unwrap();
        let entry = MaskingLogEntry::from_validated(validated, Uuid::new_v4(), Utc::now());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["originalCategory"], "phone");
        assert_eq!(json["maskedValue"], "010-****-5678");
        assert_eq!(json["agentId"], "a1");
        assert!(json.get("timestamp").is_some());
    }
}
