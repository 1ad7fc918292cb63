//! Tracking of output ranges already claimed by a replacement

use std::ops::Range;

/// One replacement made by a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Range of the match in the rule's input
    pub before: Range<usize>,
    /// Range of the replacement in the rule's output
    pub after: Range<usize>,
}

/// Sorted, non-overlapping byte ranges of masked text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumedSpans {
    spans: Vec<Range<usize>>,
}

impl ConsumedSpans {
    /// Whether `range` touches any consumed span
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        self.spans
            .iter()
            .any(|span| span.start < range.end && range.start < span.end)
    }

    /// Move existing spans into the coordinates of a rule's output and add
    /// the spans that rule produced
    ///
    /// Edits never overlap existing spans, since overlapping matches are
    /// skipped before they are replaced.
    pub fn rebase(&mut self, edits: &[Edit]) {
        if edits.is_empty() {
            return;
        }

        for span in &mut self.spans {
            let shift: isize = edits
                .iter()
                .filter(|edit| edit.before.end <= span.start)
                .map(|edit| edit.after.len() as isize - edit.before.len() as isize)
                .sum();
            let start = (span.start as isize + shift) as usize;
            let end = (span.end as isize + shift) as usize;
            *span = start..end;
        }

        self.spans.extend(edits.iter().map(|edit| edit.after.clone()));
        self.spans.sort_by_key(|span| span.start);
    }

    pub fn as_slice(&self) -> &[Range<usize>] {
        &self.spans
    }
}
