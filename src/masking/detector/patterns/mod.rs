//! Pattern library for PII detection

use crate::domain::{GuardError, Result};
use crate::masking::masker::masker_for;
use crate::masking::models::PiiCategory;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// PII category label (phone, email, card, passport)
    pub category: String,
    /// Regex with the named groups the category's masking format needs
    #[serde(default)]
    pub pattern: Option<String>,
    /// Set to false to turn the category off
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Compiled regex
    pub regex: Regex,
    /// PII category
    pub category: PiiCategory,
    /// Library entry the pattern came from
    pub name: String,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: HashMap<String, PatternDefinition>,
}

/// Pattern registry for PII detection
///
/// Holds at most one pattern per category. Iteration always follows the
/// fixed rule order, whatever order the library file used.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    patterns: BTreeMap<PiiCategory, CompiledPattern>,
}

impl PatternRegistry {
    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut registry = Self::default();
        registry.apply_toml(content)?;
        Ok(registry)
    }

    /// Create a default pattern registry with built-in patterns
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// Built-in patterns with a custom library file layered on top
    pub fn with_overrides<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GuardError::Configuration(format!(
                "Failed to read pattern library {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut registry = Self::default_patterns()?;
        registry.apply_toml(&content)?;
        Ok(registry)
    }

    /// Layer a library onto this registry
    ///
    /// An entry with a `pattern` replaces the category's regex. An entry
    /// with `enabled = false` removes the category.
    pub fn apply_toml(&mut self, content: &str) -> Result<()> {
        let library: PatternLibrary = toml::from_str(content)
            .map_err(|e| GuardError::Pattern(format!("Failed to parse pattern library: {e}")))?;

        let mut seen = HashMap::new();
        for (name, def) in library.patterns {
            let category = PiiCategory::from_label(&def.category).ok_or_else(|| {
                GuardError::Pattern(format!(
                    "Invalid category in pattern '{}': {}",
                    name, def.category
                ))
            })?;

            if let Some(previous) = seen.insert(category, name.clone()) {
                return Err(GuardError::Pattern(format!(
                    "Patterns '{previous}' and '{name}' both define category '{category}'"
                )));
            }

            if !def.enabled {
                self.patterns.remove(&category);
                continue;
            }

            let Some(pattern_str) = def.pattern else {
                if self.patterns.contains_key(&category) {
                    continue;
                }
                return Err(GuardError::Pattern(format!(
                    "Pattern '{name}' has no regex and no built-in fallback"
                )));
            };

            let regex = Regex::new(&pattern_str).map_err(|e| {
                GuardError::Pattern(format!("Invalid regex in pattern '{name}': {e}"))
            })?;
            Self::check_groups(&name, category, &regex)?;

            self.patterns.insert(
                category,
                CompiledPattern {
                    regex,
                    category,
                    name,
                },
            );
        }

        Ok(())
    }

    /// Get all patterns in rule order
    pub fn all_patterns(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.values()
    }

    /// Get the pattern for a specific category
    pub fn pattern_for_category(&self, category: PiiCategory) -> Option<&CompiledPattern> {
        self.patterns.get(&category)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn check_groups(name: &str, category: PiiCategory, regex: &Regex) -> Result<()> {
        let masker = masker_for(category);
        let names: Vec<&str> = regex.capture_names().flatten().collect();
        let missing: Vec<&str> = masker
            .required_groups()
            .iter()
            .copied()
            .filter(|group| !names.contains(group))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GuardError::Pattern(format!(
                "Pattern '{}' for category '{}' is missing capture group(s): {}",
                name,
                category,
                missing.join(", ")
            )))
        }
    }
}
