//! Upgrade acceptance policy
//!
//! Decides whether a selected candidate is an acceptable upgrade over the
//! current declaration.
//!
//! The general rule is a strict increase in precedence. The one exception is
//! a dist-tag other than `latest` applied to a prerelease: versions on
//! different tags can branch from the same baseline, so moving to the tag is
//! accepted whatever the ordering between the two versions.

use super::version::{compare, same_triple};
use crate::domain::{DeclaredRange, Preset, RejectReason, ResolutionInstruction};
use semver::Version;
use std::cmp::Ordering;
use tracing::debug;

/// Evaluate `candidate` against `current`; returns the accepted version
pub fn evaluate(
    current: &DeclaredRange,
    candidate: Option<&Version>,
    instruction: &ResolutionInstruction,
) -> Result<Version, RejectReason> {
    if instruction.requires_bound() && !current.is_bounded() {
        return Err(RejectReason::Unbounded);
    }
    let candidate = candidate.ok_or(RejectReason::NoCandidate)?;

    let Some(base) = current.version() else {
        // nothing to downgrade from
        debug!(current = %current, candidate = %candidate, "no baseline, accepting");
        return Ok(candidate.clone());
    };

    let ordering = compare(candidate, base);
    let accepted = match instruction {
        ResolutionInstruction::Tag(_) if current.is_prerelease() => {
            accepts_tag_switch(candidate, base)
        }
        ResolutionInstruction::Tag(_)
        | ResolutionInstruction::Pinned(_)
        | ResolutionInstruction::Preset(
            Preset::Latest
            | Preset::Newest
            | Preset::Greatest
            | Preset::Minor
            | Preset::Patch
            | Preset::Semver,
        ) => ordering == Ordering::Greater,
    };

    debug!(
        instruction = %instruction,
        current = %base,
        candidate = %candidate,
        accepted,
        "acceptance"
    );

    if accepted {
        Ok(candidate.clone())
    } else {
        Err(RejectReason::NotGreater)
    }
}

/// A dist-tag move away from a prerelease current version
fn accepts_tag_switch(candidate: &Version, base: &Version) -> bool {
    if same_triple(candidate, base) {
        // another prerelease line on the same triple, in either direction
        candidate.pre != base.pre
    } else {
        // tags branch independently; the triple order carries no meaning
        true
    }
}
