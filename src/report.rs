//! End-of-run summary printed to stdout.

use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::engine::Amalgamation;

/// How the run summary is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        // ---
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(anyhow!("unknown report format '{other}' (expected text or json)")),
        }
    }
}

/// Counts reported after a batch has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    // ---
    pub created: usize,
    pub updated: usize,
    pub total: usize,
    pub seeded: bool,
}

impl From<&Amalgamation> for RunSummary {
    fn from(result: &Amalgamation) -> Self {
        // ---
        RunSummary {
            created: result.created,
            updated: result.updated,
            total: result.master.len(),
            seeded: result.seeded,
        }
    }
}

impl RunSummary {
    // ---
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        // ---
        match format {
            ReportFormat::Text => Ok(format!(
                "New records added        : {:5}\n\
                 Existing records modified: {:5}\n\
                 Current total records    : {:5}",
                self.created, self.updated, self.total
            )),
            ReportFormat::Json => Ok(serde_json::to_string(self)?),
        }
    }
}
