//! In-memory, newest-first audit log of masking actions

use super::sink::AuditSink;
use crate::domain::Result;
use crate::masking::models::{MaskingLogEntry, NewLogEntry};
use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
struct LogState {
    /// Newest first
    entries: VecDeque<MaskingLogEntry>,
    last_timestamp: Option<DateTime<Utc>>,
}

/// Append-only audit log
///
/// Appends are serialized, so entries form a total newest-first order even
/// when several threads share one log. Timestamps never decrease along that
/// order.
#[derive(Debug, Default)]
pub struct AuditLog {
    state: Mutex<LogState>,
    sink: Option<AuditSink>,
}

impl AuditLog {
    /// Create an empty, memory-only log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty log that also writes every append to `sink`
    pub fn with_sink(sink: AuditSink) -> Self {
        Self {
            state: Mutex::default(),
            sink: Some(sink),
        }
    }

    /// Rebuild a log from the entries already persisted in `sink`
    pub fn restore(sink: AuditSink) -> Result<Self> {
        let persisted = sink.recover_entries()?;
        let last_timestamp = persisted.iter().map(MaskingLogEntry::timestamp).max();
        let entries: VecDeque<MaskingLogEntry> = persisted.into_iter().rev().collect();

        tracing::debug!(
            path = %sink.path().display(),
            entries = entries.len(),
            "Audit log restored"
        );

        Ok(Self {
            state: Mutex::new(LogState {
                entries,
                last_timestamp,
            }),
            sink: Some(sink),
        })
    }

    /// Validate and prepend one entry
    ///
    /// On error nothing is recorded, in memory or in the sink.
    pub fn append_log(&self, entry: NewLogEntry) -> Result<MaskingLogEntry> {
        let validated = entry.validate()?;

        let mut state = self.lock();
        let now = Utc::now();
        let timestamp = match state.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };

        let entry = MaskingLogEntry::from_validated(validated, Uuid::new_v4(), timestamp);
        if let Some(ref sink) = self.sink {
            sink.write_entry(&entry)?;
        }

        state.last_timestamp = Some(timestamp);
        state.entries.push_front(entry.clone());

        tracing::debug!(
            id = %entry.id(),
            category = %entry.original_category(),
            agent_id = entry.agent_id(),
            "Audit entry appended"
        );

        Ok(entry)
    }

    /// Snapshot of every entry, newest first
    pub fn entries(&self) -> Vec<MaskingLogEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    /// The most recent entry
    pub fn latest(&self) -> Option<MaskingLogEntry> {
        self.lock().entries.front().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn sink(&self) -> Option<&AuditSink> {
        self.sink.as_ref()
    }

    /// Drop entries stamped before `cutoff`, returning how many were removed
    ///
    /// Runs only when called. Relative order of the kept entries is
    /// unchanged, and an attached sink is rewritten to match.
    pub fn evict_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let mut state = self.lock();
        let kept: VecDeque<MaskingLogEntry> = state
            .entries
            .iter()
            .filter(|entry| entry.timestamp() >= cutoff)
            .cloned()
            .collect();
        let removed = state.entries.len() - kept.len();
        if removed == 0 {
            return Ok(0);
        }

        if let Some(ref sink) = self.sink {
            let oldest_first: Vec<MaskingLogEntry> = kept.iter().rev().cloned().collect();
            sink.rewrite(&oldest_first)?;
        }
        state.entries = kept;

        tracing::info!(removed, cutoff = %cutoff.to_rfc3339(), "Audit entries evicted");
        Ok(removed)
    }

    /// Evict entries older than `retention` relative to `now`
    pub fn apply_retention(&self, retention: Duration, now: DateTime<Utc>) -> Result<usize> {
        self.evict_older_than(now - retention)
    }

    fn lock(&self) -> MutexGuard<'_, LogState> {
        // Mutations happen only after every fallible step, so a poisoned
        // lock still guards a consistent log.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
