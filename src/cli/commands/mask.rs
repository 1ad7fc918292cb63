//! Mask command implementation

use crate::config::load_config_or_default;
use crate::masking::{AuditContext, DetectionSummary, MaskingEngine, MaskingLevel};
use anyhow::Context;
use clap::Args;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::PathBuf;
use uuid::Uuid;

/// Arguments for the mask command
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// Read input from a file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Agent recorded in the audit log
    #[arg(long, env = "PIIGUARD_AGENT_ID")]
    pub agent: Option<String>,

    /// Context note recorded in the audit log
    #[arg(long, default_value = "cli")]
    pub context: String,

    /// Print a JSON report instead of the masked text
    #[arg(long)]
    pub json: bool,
}

/// JSON report for one mask invocation
#[derive(Debug, Serialize)]
struct MaskReport {
    masked_text: String,
    applied: bool,
    level: MaskingLevel,
    detections: Vec<DetectionSummary>,
    audit_entry_ids: Vec<Uuid>,
}

impl MaskArgs {
    /// Execute the mask command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let text = self.read_input()?;
        let engine = MaskingEngine::new(config.masking).context("Failed to create masking engine")?;

        if !engine.policy().enabled() {
            tracing::warn!("Masking policy is disabled; text is passed through unchanged");
        }

        let ctx = AuditContext::new(self.agent.clone().unwrap_or_default(), self.context.clone());
        let outcome = engine.process(&text, &ctx)?;

        let mut stdout = std::io::stdout().lock();
        if self.json {
            let report = MaskReport {
                detections: outcome.result.summaries(),
                masked_text: outcome.result.masked_text,
                applied: outcome.applied,
                level: outcome.level,
                audit_entry_ids: outcome.logged.iter().map(|e| e.id()).collect(),
            };
            serde_json::to_writer_pretty(&mut stdout, &report)?;
            writeln!(stdout)?;
        } else {
            write!(stdout, "{}", outcome.result.masked_text)?;
        }
        stdout.flush()?;

        Ok(0)
    }

    fn read_input(&self) -> anyhow::Result<String> {
        match self.input {
            Some(ref path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display())),
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read stdin")?;
                Ok(buffer)
            }
        }
    }
}
