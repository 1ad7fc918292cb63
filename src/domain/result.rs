//! Result type alias for piiguard

use super::errors::GuardError;

/// Result type alias for piiguard operations
///
/// # Examples
///
/// ```
/// use piiguard::domain::result::Result;
/// use piiguard::domain::errors::{GuardError, ValidationError};
///
/// fn failing_function() -> Result<()> {
///     Err(GuardError::Validation(ValidationError::missing("agent_id")))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, GuardError>;
