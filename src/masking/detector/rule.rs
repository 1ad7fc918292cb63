//! A single detection rule: recognizer plus masking transform

use super::patterns::CompiledPattern;
use super::spans::{ConsumedSpans, Edit};
use crate::masking::masker::{masker_for, Masker};
use crate::masking::models::{Detection, PiiCategory};
use regex::Regex;

/// One step of the pipeline
pub struct Rule {
    category: PiiCategory,
    regex: Regex,
    masker: Box<dyn Masker>,
}

impl Rule {
    /// Build a rule from a compiled pattern and its category's fixed format
    pub fn from_pattern(pattern: &CompiledPattern) -> Self {
        Self {
            category: pattern.category,
            regex: pattern.regex.clone(),
            masker: masker_for(pattern.category),
        }
    }

    pub fn category(&self) -> PiiCategory {
        self.category
    }

    /// Mask every match of this rule in `text`
    pub fn apply(&self, text: &str) -> (String, Vec<Detection>) {
        self.apply_inner(text, None)
    }

    /// Like [`apply`](Self::apply), but skip matches overlapping `consumed`
    /// and record the new replacements in it
    pub fn apply_tracked(
        &self,
        text: &str,
        consumed: &mut ConsumedSpans,
    ) -> (String, Vec<Detection>) {
        self.apply_inner(text, Some(consumed))
    }

    /// An email match starting right after `@` reads the domain of the
    /// preceding address as a local part (`x@y.com@z.com`)
    fn continues_address(&self, text: &str, start: usize) -> bool {
        self.category == PiiCategory::Email && text[..start].ends_with('@')
    }

    pub(crate) fn apply_inner(
        &self,
        text: &str,
        consumed: Option<&mut ConsumedSpans>,
    ) -> (String, Vec<Detection>) {
        let mut output = String::with_capacity(text.len());
        let mut detections = Vec::new();
        let mut edits = Vec::new();
        let mut last = 0;

        for captures in self.regex.captures_iter(text) {
            let Some(matched) = captures.get(0) else {
                continue;
            };
            if matched.is_empty() || self.continues_address(text, matched.start()) {
                continue;
            }
            if let Some(spans) = consumed.as_deref() {
                if spans.overlaps(&matched.range()) {
                    continue;
                }
            }

            let masked = self.masker.mask(&captures);
            output.push_str(&text[last..matched.start()]);
            let start = output.len();
            output.push_str(&masked);
            edits.push(Edit {
                before: matched.range(),
                after: start..output.len(),
            });
            detections.push(Detection::new(
                self.category,
                matched.as_str().to_string(),
                masked,
            ));
            last = matched.end();
        }

        if detections.is_empty() {
            return (text.to_string(), detections);
        }

        output.push_str(&text[last..]);
        if let Some(spans) = consumed {
            spans.rebase(&edits);
        }
        (output, detections)
    }
}
