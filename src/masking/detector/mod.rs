//! PII detection module
//!
//! Recognizers are compiled regexes loaded from a pattern library. Each is
//! paired with its category's masking transform to form a [`Rule`].

pub mod patterns;
pub mod rule;
pub mod spans;

pub use patterns::{CompiledPattern, PatternRegistry};
pub use rule::Rule;
pub use spans::ConsumedSpans;
