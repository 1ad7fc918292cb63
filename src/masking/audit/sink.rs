//! Append-only file sink for masking audit entries

use crate::domain::{GuardError, Result};
use crate::masking::models::MaskingLogEntry;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Audit log file, one entry per line in append order
///
/// Only the JSON format can be read back by [`read_entries`](Self::read_entries).
#[derive(Debug, Clone)]
pub struct AuditSink {
    log_path: PathBuf,
    json_format: bool,
}

impl AuditSink {
    /// Create a new sink, creating the parent directory if needed
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    GuardError::Audit(format!(
                        "Failed to create audit log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn is_json(&self) -> bool {
        self.json_format
    }

    /// Append one entry to the log file
    pub fn write_entry(&self, entry: &MaskingLogEntry) -> Result<()> {
        let line = self.format_line(entry)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                GuardError::Audit(format!(
                    "Failed to open audit log {}: {}",
                    self.log_path.display(),
                    e
                ))
            })?;

        let previous_len = file.metadata()?.len();
        if let Err(e) = file.write_all(line.as_bytes()) {
            // Drop whatever part of the line reached the file
            if let Err(truncate_err) = file.set_len(previous_len) {
                tracing::warn!(
                    path = %self.log_path.display(),
                    error = %truncate_err,
                    "Failed to roll back partial audit line"
                );
            }
            return Err(GuardError::Audit(format!("Failed to write audit entry: {e}")));
        }

        Ok(())
    }

    /// Read every entry back, oldest first
    ///
    /// A missing file is an empty log. An incomplete final line is skipped.
    pub fn read_entries(&self) -> Result<Vec<MaskingLogEntry>> {
        Ok(self.parse_entries()?.0)
    }

    /// Read every entry back and rewrite the file if its last line is
    /// unterminated, dropping an incomplete final entry
    ///
    /// Later appends then start on a fresh line.
    pub fn recover_entries(&self) -> Result<Vec<MaskingLogEntry>> {
        let (entries, unterminated) = self.parse_entries()?;
        if unterminated {
            self.rewrite(&entries)?;
        }
        Ok(entries)
    }

    fn parse_entries(&self) -> Result<(Vec<MaskingLogEntry>, bool)> {
        if !self.json_format {
            return Err(GuardError::Audit(format!(
                "Audit log {} uses the plain text format and cannot be restored",
                self.log_path.display()
            )));
        }
        if !self.log_path.exists() {
            return Ok((Vec::new(), false));
        }

        let contents = fs::read_to_string(&self.log_path)?;
        let mut entries = Vec::new();
        for (idx, line) in contents.split_inclusive('\n').enumerate() {
            let complete = line.ends_with('\n');
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<MaskingLogEntry>(line) {
                Ok(entry) => entries.push(entry),
                // A final line without a newline is an append that never finished
                Err(e) if !complete => {
                    tracing::warn!(
                        path = %self.log_path.display(),
                        line = idx + 1,
                        error = %e,
                        "Skipping incomplete trailing audit entry"
                    );
                }
                Err(e) => {
                    return Err(GuardError::Serialization(format!(
                        "Invalid audit entry at {}:{}: {}",
                        self.log_path.display(),
                        idx + 1,
                        e
                    )));
                }
            }
        }

        let unterminated = !contents.is_empty() && !contents.ends_with('\n');
        Ok((entries, unterminated))
    }

    /// Replace the file contents with `entries` (oldest first)
    ///
    /// Writes to a sibling temp file and renames it over the log.
    pub fn rewrite(&self, entries: &[MaskingLogEntry]) -> Result<()> {
        let mut contents = String::new();
        for entry in entries {
            contents.push_str(&self.format_line(entry)?);
        }

        let mut tmp_name = self.log_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.log_path).map_err(|e| {
            GuardError::Audit(format!(
                "Failed to replace audit log {}: {}",
                self.log_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    fn format_line(&self, entry: &MaskingLogEntry) -> Result<String> {
        if self.json_format {
            let json = serde_json::to_string(entry)?;
            Ok(format!("{json}\n"))
        } else {
            Ok(format!(
                "[{}] {} | Category: {} | Value: {} | Agent: {} | Context: {}\n",
                entry.timestamp().to_rfc3339(),
                entry.id(),
                entry.original_category(),
                entry.masked_value(),
                entry.agent_id(),
                entry.context()
            ))
        }
    }
}
