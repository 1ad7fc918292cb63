//! Audit command implementation
//!
//! Reads the persisted audit log named by `audit.log_path`.

use crate::config::load_config_or_default;
use crate::masking::config::AuditConfig;
use crate::masking::{AuditLog, AuditSink};
use chrono::{Duration, Utc};
use clap::{Args, Subcommand};

/// Arguments for the audit command
#[derive(Args, Debug)]
pub struct AuditArgs {
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Audit subcommands
#[derive(Subcommand, Debug)]
pub enum AuditCommand {
    /// List entries, newest first
    List {
        /// Show at most this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print entries as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Evict entries older than the retention window
    Prune {
        /// Retention window in days (defaults to audit.retention_days)
        #[arg(long)]
        days: Option<u32>,
    },
}

impl AuditArgs {
    /// Execute the audit command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };
        let audit = &config.masking.audit;

        match self.command {
            AuditCommand::List { limit, json } => Self::list(audit, limit, json),
            AuditCommand::Prune { days } => Self::prune(audit, days),
        }
    }

    fn open(audit: &AuditConfig) -> anyhow::Result<AuditLog> {
        let sink = AuditSink::new(audit.log_path.clone(), audit.json_format)?;
        Ok(AuditLog::restore(sink)?)
    }

    fn list(audit: &AuditConfig, limit: Option<usize>, json: bool) -> anyhow::Result<i32> {
        let log = Self::open(audit)?;
        let entries = log.entries();
        let shown = limit.unwrap_or(entries.len()).min(entries.len());

        for entry in entries.iter().take(shown) {
            if json {
                println!("{}", serde_json::to_string(entry)?);
            } else {
                println!(
                    "{}  {:<8}  {:<24}  agent={}  {}",
                    entry.timestamp().to_rfc3339(),
                    entry.original_category(),
                    entry.masked_value(),
                    entry.agent_id(),
                    entry.context()
                );
            }
        }

        if !json {
            println!();
            println!("{} of {} entries", shown, entries.len());
        }
        Ok(0)
    }

    fn prune(audit: &AuditConfig, days: Option<u32>) -> anyhow::Result<i32> {
        let retention = match days.map(|d| Duration::days(i64::from(d))).or_else(|| audit.retention()) {
            Some(window) => window,
            None => {
                println!("❌ No retention window: pass --days or set audit.retention_days");
                return Ok(2);
            }
        };
        if retention <= Duration::zero() {
            println!("❌ Retention window must be at least one day");
            return Ok(2);
        }

        let log = Self::open(audit)?;
        let removed = log.apply_retention(retention, Utc::now())?;

        tracing::info!(removed, remaining = log.len(), "Audit log pruned");
        println!(
            "✅ Removed {} entr{} older than {} day(s); {} remaining",
            removed,
            if removed == 1 { "y" } else { "ies" },
            retention.num_days(),
            log.len()
        );
        Ok(0)
    }
}
