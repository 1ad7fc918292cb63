//! Main masking engine
//!
//! The [`MaskingEngine`] is the caller the pipeline and the audit store were
//! designed for. It owns the policy, asks it whether masking is active, runs
//! the pipeline, and turns detections into audit entries when configured to.
//!
//! # Examples
//!
//! ```
//! use piiguard::masking::{AuditContext, MaskingConfig, MaskingEngine};
//!
//! let mut config = MaskingConfig::default();
//! config.policy.enabled = true;
//!
//! let engine = MaskingEngine::new(config)?;
//! let outcome = engine.process(
//!     "passport M12345678",
//!     &AuditContext::new("agent-7", "outbound chat"),
//! )?;
//!
//! assert_eq!(outcome.result.masked_text, "passport M****5678");
//! assert_eq!(engine.audit_log().len(), 1);
//! # Ok::<(), piiguard::domain::GuardError>(())
//! ```

use crate::domain::{GuardError, Result};
use crate::masking::{
    audit::{AuditLog, AuditSink},
    config::MaskingConfig,
    detector::PatternRegistry,
    models::{MaskResult, MaskingLogEntry, NewLogEntry},
    pipeline::MaskingPipeline,
    policy::{MaskingLevel, MaskingPolicy},
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use std::time::Instant;

/// Who triggered a masking call, and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    pub agent_id: String,
    pub context: String,
}

impl AuditContext {
    pub fn new(agent_id: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            context: context.into(),
        }
    }
}

/// Result of one engine call
#[derive(Debug, Clone)]
pub struct EngineOutcome {
    /// Masked text and detections (unchanged input when masking is disabled)
    pub result: MaskResult,
    /// Whether the pipeline ran
    pub applied: bool,
    /// Policy level at the time of the call
    pub level: MaskingLevel,
    /// Audit entries appended for this call, in detection order
    pub logged: Vec<MaskingLogEntry>,
}

/// Policy-gated masking with an audit trail
pub struct MaskingEngine {
    config: MaskingConfig,
    pipeline: Arc<MaskingPipeline>,
    policy: MaskingPolicy,
    audit_log: Arc<AuditLog>,
}

impl MaskingEngine {
    /// Create a new masking engine
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - The pattern library cannot be loaded
    /// - A persisted audit log cannot be opened or restored
    pub fn new(config: MaskingConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| GuardError::Configuration(format!("Invalid masking configuration: {e}")))?;

        let registry = match config.pipeline.pattern_library {
            Some(ref path) => PatternRegistry::with_overrides(path)?,
            None => PatternRegistry::default_patterns()?,
        };
        let pipeline = MaskingPipeline::with_registry(&registry)
            .with_consumed_span_tracking(config.pipeline.track_consumed_spans);

        let audit_log = if config.audit.persist {
            let sink = AuditSink::new(config.audit.log_path.clone(), config.audit.json_format)?;
            AuditLog::restore(sink)?
        } else {
            AuditLog::new()
        };

        let policy = MaskingPolicy::new(config.policy.enabled, config.policy.level);

        tracing::info!(
            enabled = policy.enabled(),
            level = %policy.level(),
            categories = registry.len(),
            persist = config.audit.persist,
            "Masking engine initialized"
        );

        Ok(Self {
            config,
            pipeline: Arc::new(pipeline),
            policy,
            audit_log: Arc::new(audit_log),
        })
    }

    /// Mask `text` if the policy is enabled, recording detections if configured
    pub fn process(&self, text: &str, ctx: &AuditContext) -> Result<EngineOutcome> {
        let level = self.policy.level();
        if !self.policy.enabled() {
            tracing::debug!("Masking disabled, passing text through");
            return Ok(EngineOutcome {
                result: MaskResult::unchanged(text),
                applied: false,
                level,
                logged: Vec::new(),
            });
        }

        let start = Instant::now();
        let result = self.pipeline.mask(text);

        let mut logged = Vec::new();
        if self.config.audit.record_detections {
            let agent_id = if ctx.agent_id.trim().is_empty() {
                self.config.audit.default_agent_id.as_str()
            } else {
                ctx.agent_id.as_str()
            };
            for detection in &result.detections {
                let entry = NewLogEntry::from_detection(detection, ctx.context.as_str(), agent_id);
                logged.push(self.audit_log.append_log(entry)?);
            }
        }

        crate::log_masking_applied!(level, result.detections.len(), logged.len(), start.elapsed());

        Ok(EngineOutcome {
            result,
            applied: true,
            level,
            logged,
        })
    }

    /// Run the pipeline regardless of policy, without touching the audit log
    pub fn preview(&self, text: &str) -> MaskResult {
        self.pipeline.mask(text)
    }

    /// Evict audit entries older than `retention`, or the configured window
    ///
    /// Returns 0 when no window is given or configured.
    pub fn prune_audit(&self, retention: Option<Duration>) -> Result<usize> {
        match retention.or_else(|| self.config.audit.retention()) {
            Some(window) => self.audit_log.apply_retention(window, Utc::now()),
            None => Ok(0),
        }
    }

    pub fn policy(&self) -> &MaskingPolicy {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut MaskingPolicy {
        &mut self.policy
    }

    pub fn pipeline(&self) -> Arc<MaskingPipeline> {
        Arc::clone(&self.pipeline)
    }

    pub fn audit_log(&self) -> Arc<AuditLog> {
        Arc::clone(&self.audit_log)
    }

    pub fn config(&self) -> &MaskingConfig {
        &self.config
    }
}
