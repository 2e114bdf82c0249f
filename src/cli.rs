//! CLI argument parsing module for deptarget

use crate::domain::{DependencySection, TargetSpec};
use crate::error::ConfigError;
use crate::update::{DependencyFilter, PackagePattern, UpgradeOptions};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Dependency upgrade target resolver
#[derive(Parser, Debug, Clone)]
#[command(
    name = "deptarget",
    version,
    about = "Resolve the version each dependency of a package.json should move to"
)]
pub struct CliArgs {
    /// Path to the package.json to inspect
    pub path: PathBuf,

    /// Registry snapshot (JSON map of package name to packument)
    #[arg(short, long)]
    pub registry: PathBuf,

    // Resolution options
    /// Upgrade target: latest, newest, greatest, minor, patch, semver or @tag
    #[arg(short, long, env = "DEPTARGET_TARGET", default_value = "latest")]
    pub target: TargetSpec,

    /// Only consider these packages (names, globs or /regex/; comma separated)
    #[arg(short, long, action = ArgAction::Append)]
    pub filter: Vec<String>,

    /// Never consider these packages (names, globs or /regex/; comma separated)
    #[arg(short = 'x', long, action = ArgAction::Append)]
    pub reject: Vec<String>,

    /// Include (true) or exclude (false) prerelease versions
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    pub pre: Option<bool>,

    /// Dependency sections to read: prod, dev, optional, peer (default: all)
    #[arg(long = "dep", value_delimiter = ',')]
    pub dep: Vec<DependencySection>,

    // Output options
    /// Output upgraded dependencies as JSON
    #[arg(long)]
    pub json: bool,

    /// Output every dependency as JSON with upgrades applied
    #[arg(long, conflicts_with = "json")]
    pub json_all: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Sections to read from the manifest
    pub fn sections(&self) -> Vec<DependencySection> {
        if self.dep.is_empty() {
            DependencySection::ALL.to_vec()
        } else {
            self.dep.clone()
        }
    }

    /// Build the filter gate from `--filter` and `--reject`
    pub fn build_filter(&self) -> Result<DependencyFilter, ConfigError> {
        let mut filter = DependencyFilter::new();
        if !self.filter.is_empty() {
            filter = filter.with_filter(parse_patterns(&self.filter)?);
        }
        if !self.reject.is_empty() {
            filter = filter.with_reject(parse_patterns(&self.reject)?);
        }
        Ok(filter)
    }

    /// Build the resolution options
    pub fn build_options(&self) -> Result<UpgradeOptions, ConfigError> {
        let mut options = UpgradeOptions::new()
            .with_target(self.target.clone())
            .with_filter(self.build_filter()?);
        if let Some(pre) = self.pre {
            options = options.with_pre(pre);
        }
        Ok(options)
    }
}

fn parse_patterns(values: &[String]) -> Result<Vec<PackagePattern>, ConfigError> {
    let mut patterns = Vec::new();
    for value in values {
        patterns.extend(PackagePattern::parse_list(value)?);
    }
    Ok(patterns)
}
