// piiguard - PII Detection & Masking Engine
// Copyright (c) 2025 Piiguard Contributors
// Licensed under the MIT License

//! # piiguard - PII detection and masking
//!
//! piiguard scans free-form text (outbound chat messages, booking notes)
//! for personally identifying information and replaces each match with a
//! partially redacted token, while keeping an audit trail of what was
//! masked, by whom, and when.
//!
//! ## Overview
//!
//! - **Detecting** Korean mobile numbers, email addresses, payment cards and
//!   passport numbers with an ordered set of regex rules
//! - **Masking** each match with a fixed, partial format (`010-****-5678`)
//! - **Gating** masking behind an explicitly constructed policy
//! - **Auditing** every masking action in an append-only, newest-first log
//!
//! ## Architecture
//!
//! - [`masking`] - Pipeline, policy, audit store and engine
//! - [`config`] - Configuration management
//! - [`domain`] - Error and result types
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust
//! use piiguard::masking::{AuditContext, MaskingConfig, MaskingEngine};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = MaskingEngine::new(MaskingConfig::default())?;
//! engine.policy_mut().toggle_enabled();
//!
//! let outcome = engine.process(
//!     "연락처 010-1234-5678, jane.doe@example.com",
//!     &AuditContext::new("agent-42", "outbound chat"),
//! )?;
//!
//! assert_eq!(outcome.result.masked_text, "연락처 010-****-5678, j***@example.com");
//! assert_eq!(engine.audit_log().len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The pipeline never fails. Configuration, pattern libraries and audit
//! appends report errors through [`domain::GuardError`].
//!
//! ## Logging
//!
//! piiguard uses structured logging with the `tracing` crate. Events carry
//! categories, counts and masked values, never raw matches.

pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod masking;
