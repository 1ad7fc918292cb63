//! PII categories and detection records

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Categories the detection pipeline recognizes
///
/// Declaration order is the fixed rule order of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PiiCategory {
    /// Korean mobile phone numbers
    Phone,
    /// Email addresses
    Email,
    /// Payment card numbers (16 digits in four groups)
    Card,
    /// Passport numbers (one letter, eight digits)
    Passport,
}

impl PiiCategory {
    /// All categories in pipeline rule order
    pub const ALL: [PiiCategory; 4] = [Self::Phone, Self::Email, Self::Card, Self::Passport];

    /// Lowercase label used in configuration and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Card => "card",
            Self::Passport => "passport",
        }
    }

    /// Parse a category label, case-insensitively
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            "card" => Some(Self::Card),
            "passport" => Some(Self::Passport),
            _ => None,
        }
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Categories that may appear in the audit log
///
/// A superset of [`PiiCategory`]: callers may record masking of values the
/// pipeline does not detect itself, such as names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Name,
    Phone,
    Email,
    Card,
    Passport,
}

impl LogCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Card => "card",
            Self::Passport => "passport",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Some(Self::Name),
            other => PiiCategory::from_label(other).map(Self::from),
        }
    }
}

impl From<PiiCategory> for LogCategory {
    fn from(category: PiiCategory) -> Self {
        match category {
            PiiCategory::Phone => Self::Phone,
            PiiCategory::Email => Self::Email,
            PiiCategory::Card => Self::Card,
            PiiCategory::Passport => Self::Passport,
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One recognized PII occurrence
///
/// The raw match lives only as long as this record: it is wiped from memory
/// on drop, never serialized, and hidden from `Debug` output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Detection {
    #[zeroize(skip)]
    category: PiiCategory,
    original: String,
    masked: String,
}

impl Detection {
    /// Create a new detection
    pub fn new(category: PiiCategory, original: String, masked: String) -> Self {
        Self {
            category,
            original,
            masked,
        }
    }

    pub fn category(&self) -> PiiCategory {
        self.category
    }

    /// The exact substring that was matched
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The replacement written into the output
    pub fn masked(&self) -> &str {
        &self.masked
    }
}

impl fmt::Debug for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detection")
            .field("category", &self.category)
            .field("original", &"[REDACTED]")
            .field("masked", &self.masked)
            .finish()
    }
}

/// Serializable view of a detection, without the raw match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub category: PiiCategory,
    pub masked: String,
}

impl From<&Detection> for DetectionSummary {
    fn from(detection: &Detection) -> Self {
        Self {
            category: detection.category,
            masked: detection.masked.clone(),
        }
    }
}

/// Output of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskResult {
    /// Input text with every detection replaced
    pub masked_text: String,
    /// Replacements in rule order, then match order within a rule
    pub detections: Vec<Detection>,
}

impl MaskResult {
    /// A result for text in which nothing was found
    pub fn unchanged(text: &str) -> Self {
        Self {
            masked_text: text.to_string(),
            detections: Vec::new(),
        }
    }

    pub fn has_detections(&self) -> bool {
        !self.detections.is_empty()
    }

    /// Detections without their raw values, safe to print or serialize
    pub fn summaries(&self) -> Vec<DetectionSummary> {
        self.detections.iter().map(DetectionSummary::from).collect()
    }
}
