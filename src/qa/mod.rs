// src/qa/mod.rs
pub mod checks;
pub mod dates;
pub mod display;
pub mod summary;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{fs, path::Path};
use tracing::{info, warn};

use crate::config::Config;
use crate::process::CanonicalTable;

pub use checks::{DuplicateEvent, EventRef, RangeFinding};
pub use dates::DateSummary;
pub use display::print_report;
pub use summary::FieldSummary;

/// Quality-assurance findings for one merged table. Purely descriptive:
/// building a report never changes the table.
#[derive(Debug, Clone, Serialize)]
pub struct QaReport {
    pub generated_at: DateTime<Utc>,
    pub rows: usize,
    pub summary: Vec<FieldSummary>,
    pub dates: DateSummary,
    pub range_findings: Vec<RangeFinding>,
    pub missing_coordinates: Vec<EventRef>,
    pub duplicates: Vec<DuplicateEvent>,
}

impl QaReport {
    /// Findings not covered by the allow-list.
    pub fn open_findings(&self) -> usize {
        self.range_findings.iter().filter(|f| !f.accepted).count()
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut json = serde_json::to_string_pretty(self).context("serializing QA report")?;
        json.push('\n');
        fs::write(path, json).with_context(|| format!("writing QA report {:?}", path))?;
        info!(path = %path.display(), "wrote QA report");
        Ok(())
    }
}

pub fn build_report(table: &CanonicalTable, cfg: &Config) -> QaReport {
    let report = QaReport {
        generated_at: Utc::now(),
        rows: table.num_rows(),
        summary: summary::summarize(table),
        dates: dates::summarize_dates(table),
        range_findings: checks::range_findings(table, &cfg.ranges, &cfg.accepted_outliers),
        missing_coordinates: checks::missing_coordinates(table),
        duplicates: checks::duplicate_events(table),
    };

    let open = report.open_findings();
    if open > 0 {
        warn!(
            open,
            accepted = report.range_findings.len() - open,
            "values outside expected ranges"
        );
    }
    info!(
        rows = report.rows,
        missing_coordinates = report.missing_coordinates.len(),
        duplicates = report.duplicates.len(),
        "QA report built"
    );
    report
}
