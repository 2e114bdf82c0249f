//! JSON output formatter for machine processing
//!
//! Writes a single object mapping package names to declarations: either only
//! the upgraded dependencies or every dependency with upgrades applied.

use crate::orchestrator::UpgradeReport;
use crate::output::OutputFormatter;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Include dependencies that are not upgraded
    all: bool,
}

impl JsonFormatter {
    /// Formatter writing only upgraded dependencies
    pub fn upgraded() -> Self {
        Self { all: false }
    }

    /// Formatter writing every dependency with upgrades applied
    pub fn merged() -> Self {
        Self { all: true }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &UpgradeReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let map = if self.all {
            report.merged()
        } else {
            report.upgraded()
        };
        serde_json::to_writer_pretty(&mut *writer, &map)?;
        writeln!(writer)
    }
}
