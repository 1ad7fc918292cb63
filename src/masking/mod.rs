//! PII detection and masking
//!
//! This module scans free text for phone numbers, email addresses, payment
//! cards and passport numbers, replaces each with a partially redacted
//! token, and keeps an audit trail of what was masked.
//!
//! # Architecture
//!
//! - **Pipeline**: ordered regex rules, each with a fixed masking format
//! - **Policy**: enable flag and declared sensitivity level
//! - **Audit**: append-only, newest-first log, optionally persisted
//! - **Engine**: consults the policy, runs the pipeline, records detections
//!
//! # Usage
//!
//! ```rust
//! use piiguard::masking::MaskingPipeline;
//!
//! let pipeline = MaskingPipeline::new()?;
//! let result = pipeline.mask("card 1234-5678-9012-3456");
//! assert_eq!(result.masked_text, "card ****-****-****-3456");
//! # Ok::<(), piiguard::domain::GuardError>(())
//! ```

pub mod audit;
pub mod config;
pub mod detector;
pub mod engine;
pub mod masker;
pub mod models;
pub mod pipeline;
pub mod policy;

// Re-export main types
pub use audit::{AuditLog, AuditSink};
pub use config::MaskingConfig;
pub use engine::{AuditContext, EngineOutcome, MaskingEngine};
pub use models::{
    Detection, DetectionSummary, LogCategory, MaskResult, MaskingLogEntry, NewLogEntry,
    PiiCategory,
};
pub use pipeline::MaskingPipeline;
pub use policy::{MaskingLevel, MaskingPolicy};
