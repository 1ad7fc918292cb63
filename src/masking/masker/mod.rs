//! Masking transforms
//!
//! Each category has one fixed masking format. A [`Masker`] turns the
//! capture groups of a recognizer match into the replacement text.
//!
//! Every format replaces the hidden characters with `*`. None of the
//! recognizers match `*`, so masking its own output finds nothing new.

pub mod partial;

use crate::masking::models::PiiCategory;
use regex::Captures;

pub use partial::{CardMasker, EmailMasker, PassportMasker, PhoneMasker};

/// Trait for category-specific masking transforms
pub trait Masker: Send + Sync {
    /// Build the replacement for one match
    fn mask(&self, captures: &Captures<'_>) -> String;

    /// Named capture groups the recognizer must expose
    fn required_groups(&self) -> &'static [&'static str];
}

/// Masker for a category's fixed format
pub fn masker_for(category: PiiCategory) -> Box<dyn Masker> {
    match category {
        PiiCategory::Phone => Box::new(PhoneMasker),
        PiiCategory::Email => Box::new(EmailMasker),
        PiiCategory::Card => Box::new(CardMasker),
        PiiCategory::Passport => Box::new(PassportMasker),
    }
}

/// Text of a named group, or empty if it did not participate
pub(crate) fn group<'t>(captures: &Captures<'t>, name: &str) -> &'t str {
    captures.name(name).map(|m| m.as_str()).unwrap_or_default()
}
