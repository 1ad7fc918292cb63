//! Logging and observability
//!
//! Structured logging with `tracing`: console output plus optional JSON
//! files with rotation. Log events carry categories, counts and masked
//! values only, never the raw matched text.
//!
//! # Example
//!
//! ```no_run
//! use piiguard::logging::init_logging;
//! use piiguard::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of one masking call
///
/// # Example
///
/// ```no_run
/// use piiguard::log_masking_applied;
/// use piiguard::masking::MaskingLevel;
/// use std::time::Duration;
///
/// log_masking_applied!(MaskingLevel::Basic, 3, 3, Duration::from_micros(40));
/// ```
#[macro_export]
macro_rules! log_masking_applied {
    ($level:expr, $detections:expr, $logged:expr, $duration:expr) => {
        tracing::info!(
            level = %$level,
            detections = $detections,
            logged = $logged,
            duration_us = $duration.as_micros() as u64,
            "Masking applied"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use piiguard::log_error_with_context;
/// use piiguard::domain::GuardError;
///
/// let error = GuardError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
