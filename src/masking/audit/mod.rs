//! Audit logging module
//!
//! An append-only, newest-first record of masking actions, optionally
//! mirrored to a JSON-lines file that can be restored on startup.

pub mod sink;
pub mod store;

pub use sink::AuditSink;
pub use store::AuditLog;
