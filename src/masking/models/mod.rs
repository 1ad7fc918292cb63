//! Data models shared by the pipeline and the audit store

pub mod log_entry;
pub mod pii;

pub use log_entry::{MaskingLogEntry, NewLogEntry};
pub use pii::{Detection, DetectionSummary, LogCategory, MaskResult, PiiCategory};
