//! Domain error and result types for piiguard.
//!
//! All fallible operations return [`Result<T, GuardError>`]:
//!
//! ```rust
//! use piiguard::domain::{GuardError, Result};
//! use piiguard::masking::MaskingLevel;
//!
//! fn example() -> Result<MaskingLevel> {
//!     // Unknown level names are rejected with a validation error
//!     let level: MaskingLevel = "enhanced".parse()?;
//!     Ok(level)
//! }
//! # assert!(example().is_ok());
//! ```

pub mod errors;
pub mod result;

pub use errors::{GuardError, ValidationError};
pub use result::Result;
