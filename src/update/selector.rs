//! Candidate selection
//!
//! Picks one concrete version from the package metadata for a resolution
//! instruction. Range-scanning presets honor the prerelease setting; dist-tags
//! and pinned versions are taken as they are.

use super::version::{compare, is_prerelease};
use crate::domain::{
    DeclaredRange, PackageMetadata, Preset, PublishedVersion, RangeOperator, RangeSpec,
    ResolutionInstruction,
};
use semver::{Version, VersionReq};
use tracing::trace;

/// Pick the candidate version for `instruction`.
///
/// `pre` is the caller's prerelease setting; when unset, every
/// range-scanning preset includes prereleases.
pub fn select_candidate(
    instruction: &ResolutionInstruction,
    metadata: &PackageMetadata,
    current: &DeclaredRange,
    pre: Option<bool>,
) -> Option<Version> {
    match instruction {
        ResolutionInstruction::Tag(tag) => metadata.tag(tag).cloned(),
        ResolutionInstruction::Pinned(version) => Some(version.clone()),
        ResolutionInstruction::Preset(Preset::Latest) => Some(metadata.latest().clone()),
        ResolutionInstruction::Preset(preset) => {
            let include_pre = pre.unwrap_or(true);
            let eligible = metadata
                .versions()
                .iter()
                .filter(|v| include_pre || !v.is_prerelease());
            select_from(*preset, eligible, current)
        }
    }
}

fn select_from<'a>(
    preset: Preset,
    eligible: impl Iterator<Item = &'a PublishedVersion>,
    current: &DeclaredRange,
) -> Option<Version> {
    let selected = match preset {
        Preset::Newest => eligible
            .max_by(|a, b| {
                a.published_at
                    .cmp(&b.published_at)
                    .then_with(|| compare(&a.version, &b.version))
            })
            .map(|v| &v.version),
        Preset::Greatest => greatest(eligible.map(|v| &v.version)),
        Preset::Minor => {
            let base = current.version()?;
            greatest(
                eligible
                    .map(|v| &v.version)
                    .filter(|v| v.major == base.major),
            )
        }
        Preset::Patch => {
            let base = current.version()?;
            greatest(
                eligible
                    .map(|v| &v.version)
                    .filter(|v| v.major == base.major && v.minor == base.minor),
            )
        }
        Preset::Semver => {
            let DeclaredRange::Valid(spec) = current else {
                return None;
            };
            let req = version_req(spec)?;
            greatest(eligible.map(|v| &v.version).filter(|v| req.matches(v)))
        }
        Preset::Latest => None,
    };

    trace!(preset = %preset, selected = ?selected.map(|v| v.to_string()), "scanned versions");
    selected.cloned()
}

fn greatest<'a>(versions: impl Iterator<Item = &'a Version>) -> Option<&'a Version> {
    versions.max_by(|a, b| compare(a, b))
}

/// Build a requirement equivalent to the declared range
pub(crate) fn version_req(spec: &RangeSpec) -> Option<VersionReq> {
    let op = match spec.operator {
        RangeOperator::Caret => "^",
        RangeOperator::Tilde => "~",
        RangeOperator::Gte => ">=",
        RangeOperator::Exact | RangeOperator::Bare => "=",
        RangeOperator::Other => spec.prefix.trim_end_matches('v').trim(),
    };

    let v = &spec.version;
    let mut text = [v.major, v.minor, v.patch]
        .iter()
        .take(spec.precision as usize)
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".");
    text.push_str(&spec.suffix);
    if is_prerelease(v) {
        text.push('-');
        text.push_str(v.pre.as_str());
    }

    VersionReq::parse(&format!("{}{}", op, text)).ok()
}
