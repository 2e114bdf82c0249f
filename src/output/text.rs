//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Human-readable upgrade display with colors
//! - Semantic version change type indication (major/minor/patch/prerelease)
//! - Rejected dependency display with reasons (verbose)
//! - Summary line

use crate::domain::UpgradeDecision;
use crate::orchestrator::{DependencyOutcome, UpgradeReport};
use crate::output::{OutputFormatter, Verbosity};
use crate::parser::parse_range;
use colored::Colorize;
use semver::Version;
use std::io::Write;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Move to or between prereleases of the same triple
    Prerelease,
    /// No declared version to compare with
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between the declared version and the new one
    pub fn from_versions(old: Option<&Version>, new: &Version) -> Self {
        let Some(old) = old else {
            return VersionChangeType::Unknown;
        };
        if new.major != old.major {
            VersionChangeType::Major
        } else if new.minor != old.minor {
            VersionChangeType::Minor
        } else if new.patch != old.patch {
            VersionChangeType::Patch
        } else {
            VersionChangeType::Prerelease
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => "major".red().bold().to_string(),
            VersionChangeType::Minor => "minor".yellow().to_string(),
            VersionChangeType::Patch => "patch".green().to_string(),
            VersionChangeType::Prerelease => "prerelease".magenta().to_string(),
            VersionChangeType::Unknown => "?".dimmed().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Prerelease => "prerelease",
            VersionChangeType::Unknown => "?",
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn max_name_length<'a>(outcomes: impl Iterator<Item = &'a DependencyOutcome>) -> usize {
        outcomes
            .map(|o| o.dependency.name.len())
            .max()
            .unwrap_or(0)
    }

    /// Format a single upgrade line
    fn format_upgrade_line(
        &self,
        outcome: &DependencyOutcome,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let UpgradeDecision::Accepted {
            declaration,
            version,
        } = &outcome.decision
        else {
            return Ok(());
        };
        let dependency = &outcome.dependency;
        let current = parse_range(&dependency.declaration);
        let change_type = VersionChangeType::from_versions(current.version(), version);

        if self.color {
            let name_display = format!("{:width$}", dependency.name, width = max_name_len);
            let dev_display = if dependency.is_dev() {
                " (dev)".dimmed().to_string()
            } else {
                String::new()
            };
            writeln!(
                writer,
                "  {} {} {} {} [{}]{}",
                name_display,
                dependency.declaration.dimmed(),
                "→".dimmed(),
                declaration.bright_white().bold(),
                change_type.colored_label(),
                dev_display
            )
        } else {
            let dev_marker = if dependency.is_dev() { " (dev)" } else { "" };
            writeln!(
                writer,
                "  {:width$} {} -> {} [{}]{}",
                dependency.name,
                dependency.declaration,
                declaration,
                change_type.label(),
                dev_marker,
                width = max_name_len
            )
        }
    }

    /// Format a single rejection line
    fn format_reject_line(
        &self,
        outcome: &DependencyOutcome,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let Some(reason) = outcome.decision.reason() else {
            return Ok(());
        };
        let name = &outcome.dependency.name;

        if self.color {
            let name_display = format!("{:width$}", name, width = max_name_len);
            writeln!(
                writer,
                "  {} {}",
                name_display.dimmed(),
                format!("({})", reason).dimmed()
            )
        } else {
            writeln!(writer, "  {:width$} ({})", name, reason, width = max_name_len)
        }
    }

    fn format_summary(&self, report: &UpgradeReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let upgrades = report.accepted().count();
        let total = report.outcomes.len();

        match (upgrades, self.color) {
            (0, true) => writeln!(writer, "{}", "All dependencies are up to date".green()),
            (0, false) => writeln!(writer, "All dependencies are up to date"),
            (n, true) => writeln!(
                writer,
                "{} of {} dependencies can be upgraded",
                n.to_string().green().bold(),
                total
            ),
            (n, false) => writeln!(writer, "{} of {} dependencies can be upgraded", n, total),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &UpgradeReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let max_name_len = Self::max_name_length(report.outcomes.iter());

        for outcome in report.accepted() {
            self.format_upgrade_line(outcome, max_name_len, writer)?;
        }

        // In quiet mode, only the upgrade lines
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        if self.verbosity == Verbosity::Verbose {
            let rejected: Vec<_> = report
                .outcomes
                .iter()
                .filter(|o| !o.decision.is_accepted())
                .collect();
            if !rejected.is_empty() {
                writeln!(writer)?;
                if self.color {
                    writeln!(writer, "{}:", "Not upgraded".dimmed().bold())?;
                } else {
                    writeln!(writer, "Not upgraded:")?;
                }
                for outcome in rejected {
                    self.format_reject_line(outcome, max_name_len, writer)?;
                }
            }
        }

        if !report.errors.is_empty() {
            writeln!(writer)?;
            if self.color {
                writeln!(writer, "{}:", "Errors".red().bold())?;
            } else {
                writeln!(writer, "Errors:")?;
            }
            for error in &report.errors {
                if self.color {
                    writeln!(writer, "  {} {}", "✗".red(), error)?;
                } else {
                    writeln!(writer, "  - {}", error)?;
                }
            }
        }

        writeln!(writer)?;
        self.format_summary(report, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dependency, DependencySection, RejectReason};
    use crate::orchestrator::OrchestratorError;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn report() -> UpgradeReport {
        UpgradeReport {
            outcomes: vec![
                DependencyOutcome {
                    dependency: Dependency::production("chalk", "^2.3.0"),
                    decision: UpgradeDecision::accepted("^5.0.0", v("5.0.0")),
                },
                DependencyOutcome {
                    dependency: Dependency::new("mocha", "^8.3.2", DependencySection::Dev),
                    decision: UpgradeDecision::accepted("^8.4.0", v("8.4.0")),
                },
                DependencyOutcome {
                    dependency: Dependency::production("express", "4.18.2"),
                    decision: UpgradeDecision::rejected(RejectReason::Unchanged),
                },
            ],
            errors: Vec::new(),
        }
    }

    fn render(formatter: TextFormatter, report: &UpgradeReport) -> String {
        let mut out = Vec::new();
        formatter.format(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_change_type() {
        let old = v("2.3.0");
        assert_eq!(
            VersionChangeType::from_versions(Some(&old), &v("5.0.0")),
            VersionChangeType::Major
        );
        assert_eq!(
            VersionChangeType::from_versions(Some(&old), &v("2.4.2")),
            VersionChangeType::Minor
        );
        assert_eq!(
            VersionChangeType::from_versions(Some(&old), &v("2.3.1")),
            VersionChangeType::Patch
        );
        assert_eq!(
            VersionChangeType::from_versions(Some(&v("1.0.0-1")), &v("1.0.0-task-42.0")),
            VersionChangeType::Prerelease
        );
        assert_eq!(
            VersionChangeType::from_versions(None, &v("1.0.0")),
            VersionChangeType::Unknown
        );
    }

    #[test]
    fn test_format_plain() {
        let output = render(TextFormatter::with_color(Verbosity::Normal, false), &report());
        assert!(output.contains("chalk   ^2.3.0 -> ^5.0.0 [major]"));
        assert!(output.contains("mocha   ^8.3.2 -> ^8.4.0 [minor] (dev)"));
        assert!(!output.contains("express"));
        assert!(output.contains("2 of 3 dependencies can be upgraded"));
    }

    #[test]
    fn test_format_verbose_lists_rejections() {
        let output = render(TextFormatter::with_color(Verbosity::Verbose, false), &report());
        assert!(output.contains("Not upgraded:"));
        assert!(output.contains("express (unchanged)"));
    }

    #[test]
    fn test_format_quiet() {
        let output = render(TextFormatter::with_color(Verbosity::Quiet, false), &report());
        assert!(output.contains("chalk"));
        assert!(!output.contains("can be upgraded"));
    }

    #[test]
    fn test_format_nothing_to_do() {
        let report = UpgradeReport::default();
        let output = render(TextFormatter::with_color(Verbosity::Normal, false), &report);
        assert!(output.contains("All dependencies are up to date"));
    }

    #[test]
    fn test_format_errors() {
        let mut report = report();
        report.errors.push(OrchestratorError::RegistryError {
            package: "left-pad".to_string(),
            message: "not found".to_string(),
        });
        let output = render(TextFormatter::with_color(Verbosity::Normal, false), &report);
        assert!(output.contains("Errors:"));
        assert!(output.contains("  - Failed to fetch left-pad: not found"));
    }
}
