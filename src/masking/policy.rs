//! Masking policy: enable flag and sensitivity level
//!
//! The level is carried as configuration only. The pipeline applies the
//! same rules at every level.

use crate::domain::{GuardError, Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared sensitivity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskingLevel {
    #[default]
    Basic,
    Enhanced,
    Maximum,
}

impl MaskingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Enhanced => "enhanced",
            Self::Maximum => "maximum",
        }
    }
}

impl fmt::Display for MaskingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaskingLevel {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "enhanced" => Ok(Self::Enhanced),
            "maximum" => Ok(Self::Maximum),
            _ => Err(GuardError::Validation(ValidationError::invalid(
                "level",
                format!("unknown masking level '{s}', expected one of: basic, enhanced, maximum"),
            ))),
        }
    }
}

/// Whether callers should mask, and at which declared level
///
/// Built once by the composition root and passed to whoever needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaskingPolicy {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    level: MaskingLevel,
}

impl MaskingPolicy {
    /// A policy with the given state
    pub fn new(enabled: bool, level: MaskingLevel) -> Self {
        Self { enabled, level }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn level(&self) -> MaskingLevel {
        self.level
    }

    /// Flip the enable flag and return the new value
    pub fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        tracing::info!(enabled = self.enabled, "Masking policy toggled");
        self.enabled
    }

    pub fn set_level(&mut self, level: MaskingLevel) {
        if self.level != level {
            tracing::info!(from = %self.level, to = %level, "Masking level changed");
        }
        self.level = level;
    }

    /// Parse and set a level from text, leaving the policy untouched on error
    pub fn set_level_str(&mut self, level: &str) -> Result<()> {
        let level = level.parse()?;
        self.set_level(level);
        Ok(())
    }
}
