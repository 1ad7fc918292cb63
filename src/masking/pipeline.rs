//! The detection and masking pipeline
//!
//! Rules run in a fixed order: phone, email, card, passport. Each rule
//! scans the output of the previous one, so later rules never see the
//! digits an earlier rule replaced with `*`. The flip side is that an
//! earlier rule can claim a span a later rule would have matched.
//!
//! # Examples
//!
//! ```
//! use piiguard::masking::{MaskingPipeline, PiiCategory};
//!
//! let pipeline = MaskingPipeline::new()?;
//! let result = pipeline.mask("call 010-1234-5678");
//!
//! assert_eq!(result.masked_text, "call 010-****-5678");
//! assert_eq!(result.detections[0].category(), PiiCategory::Phone);
//! # Ok::<(), piiguard::domain::GuardError>(())
//! ```

use crate::domain::Result;
use crate::masking::detector::{ConsumedSpans, PatternRegistry, Rule};
use crate::masking::models::{Detection, MaskResult, PiiCategory};

/// Ordered sequence of detection rules
///
/// Immutable once built and safe to share across threads.
pub struct MaskingPipeline {
    rules: Vec<Rule>,
    track_consumed_spans: bool,
}

impl MaskingPipeline {
    /// Create a pipeline with the built-in patterns
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(&PatternRegistry::default_patterns()?))
    }

    /// Create a pipeline from a custom pattern registry
    pub fn with_registry(registry: &PatternRegistry) -> Self {
        Self {
            rules: registry.all_patterns().map(Rule::from_pattern).collect(),
            track_consumed_spans: false,
        }
    }

    /// Skip later matches that overlap text an earlier rule already masked
    pub fn with_consumed_span_tracking(mut self, enabled: bool) -> Self {
        self.track_consumed_spans = enabled;
        self
    }

    /// Mask every recognized PII occurrence in `text`
    ///
    /// Never fails: text without PII comes back unchanged with no detections.
    pub fn mask(&self, text: &str) -> MaskResult {
        let mut consumed = self.track_consumed_spans.then(ConsumedSpans::default);

        let (masked_text, detections) = self.rules.iter().fold(
            (text.to_string(), Vec::<Detection>::new()),
            |(current, mut detections), rule| {
                let (next, found) = rule.apply_inner(&current, consumed.as_mut());
                detections.extend(found);
                (next, detections)
            },
        );

        MaskResult {
            masked_text,
            detections,
        }
    }

    /// Categories this pipeline detects, in rule order
    pub fn categories(&self) -> Vec<PiiCategory> {
        self.rules.iter().map(Rule::category).collect()
    }

    pub fn tracks_consumed_spans(&self) -> bool {
        self.track_consumed_spans
    }
}
