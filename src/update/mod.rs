//! Upgrade resolution for dependencies
//!
//! This module provides:
//! - The filter gate that can veto a dependency before anything else runs
//! - Target level resolution (preset, dist-tag or custom function)
//! - Candidate selection from registry metadata
//! - The acceptance policy that decides whether a candidate is an upgrade
//! - Formatting of the new declaration
//!
//! Resolution of one dependency is synchronous and pure; callers may resolve
//! many dependencies concurrently.

mod acceptance;
mod filter;
mod format;
mod selector;
mod target_level;
mod version;

pub use acceptance::evaluate;
pub use filter::{DependencyFilter, FilterFn, PackagePattern};
pub use format::format_upgrade;
pub use selector::select_candidate;
pub use target_level::{interpret_custom, resolve_instruction};
pub use version::{compare, is_prerelease, same_triple};

use crate::domain::{DeclaredRange, PackageMetadata, RejectReason, TargetSpec, UpgradeDecision};
use crate::parser::parse_range;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Configuration bag for a resolution run
#[derive(Debug, Clone, Default)]
pub struct UpgradeOptions {
    /// What to upgrade to
    pub target: TargetSpec,
    /// Which dependencies take part
    pub filter: DependencyFilter,
    /// Include prerelease candidates (unset: included)
    pub pre: Option<bool>,
}

impl UpgradeOptions {
    /// Create options with the default `latest` target and no filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target
    pub fn with_target(mut self, target: TargetSpec) -> Self {
        self.target = target;
        self
    }

    /// Set the filter gate
    pub fn with_filter(mut self, filter: DependencyFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Force prerelease candidates in or out
    pub fn with_pre(mut self, pre: bool) -> Self {
        self.pre = Some(pre);
        self
    }
}

/// Upgrade judgment engine that decides whether to upgrade a dependency
#[derive(Debug, Clone, Default)]
pub struct UpgradeJudge {
    options: UpgradeOptions,
}

impl UpgradeJudge {
    /// Create a new UpgradeJudge with the given options
    pub fn new(options: UpgradeOptions) -> Self {
        Self { options }
    }

    /// The options this judge applies
    pub fn options(&self) -> &UpgradeOptions {
        &self.options
    }

    /// Run the filter gate.
    /// Returns Some(RejectReason) if the dependency must be dropped
    pub fn should_skip(&self, name: &str, range: &DeclaredRange) -> Option<RejectReason> {
        if self.options.filter.allows(name, range) {
            None
        } else {
            debug!(dependency = name, "filtered out");
            Some(RejectReason::Filtered)
        }
    }

    /// Decide the upgrade for a dependency that already passed the gate
    pub fn decide(
        &self,
        name: &str,
        range: &DeclaredRange,
        metadata: &PackageMetadata,
    ) -> UpgradeDecision {
        let Some(instruction) = resolve_instruction(&self.options.target, name, range) else {
            debug!(dependency = name, "no usable target");
            return UpgradeDecision::rejected(RejectReason::NoInstruction);
        };

        let candidate = select_candidate(&instruction, metadata, range, self.options.pre);
        debug!(
            dependency = name,
            instruction = %instruction,
            candidate = ?candidate.as_ref().map(|v| v.to_string()),
            "candidate selected"
        );

        let version = match evaluate(range, candidate.as_ref(), &instruction) {
            Ok(version) => version,
            Err(reason) => return UpgradeDecision::rejected(reason),
        };

        let declaration = format_upgrade(range, &version);
        if declaration == range.raw().trim() {
            return UpgradeDecision::rejected(RejectReason::Unchanged);
        }
        UpgradeDecision::accepted(declaration, version)
    }

    /// Gate and decide in one step
    pub fn judge(
        &self,
        name: &str,
        range: &DeclaredRange,
        metadata: &PackageMetadata,
    ) -> UpgradeDecision {
        if let Some(reason) = self.should_skip(name, range) {
            return UpgradeDecision::rejected(reason);
        }
        self.decide(name, range, metadata)
    }
}

/// Resolve a set of declarations against metadata the caller already holds.
///
/// Returns only the dependencies with an accepted upgrade, mapped to their new
/// declaration. Dependencies without metadata are left out.
pub fn upgrade_dependencies<'a>(
    dependencies: impl IntoIterator<Item = (&'a str, &'a str)>,
    metadata: &HashMap<String, PackageMetadata>,
    options: &UpgradeOptions,
) -> BTreeMap<String, String> {
    let judge = UpgradeJudge::new(options.clone());
    let mut upgraded = BTreeMap::new();

    for (name, raw) in dependencies {
        let range = parse_range(raw);
        if judge.should_skip(name, &range).is_some() {
            continue;
        }
        let Some(meta) = metadata.get(name) else {
            debug!(dependency = name, "no metadata");
            continue;
        };
        if let UpgradeDecision::Accepted { declaration, .. } = judge.decide(name, &range, meta) {
            upgraded.insert(name.to_string(), declaration);
        }
    }

    upgraded
}
