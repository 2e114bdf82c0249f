//! Target level resolution
//!
//! Turns the caller's [`TargetSpec`] into the concrete instruction used for
//! one dependency.

use crate::domain::{DeclaredRange, Preset, ResolutionInstruction, TargetSpec, LATEST_TAG};
use semver::Version;
use tracing::debug;

/// Resolve the instruction for one dependency.
///
/// Returns `None` only when a custom target produced something that is
/// neither a keyword, an `@tag`, nor a version.
pub fn resolve_instruction(
    target: &TargetSpec,
    name: &str,
    range: &DeclaredRange,
) -> Option<ResolutionInstruction> {
    match target {
        TargetSpec::Preset(preset) => Some(ResolutionInstruction::Preset(*preset)),
        TargetSpec::Tag(tag) => Some(tag_instruction(tag)),
        TargetSpec::Custom(f) => {
            let value = f(name, std::slice::from_ref(range));
            let instruction = interpret_custom(&value);
            debug!(dependency = name, value = %value, "custom target returned");
            instruction
        }
    }
}

/// Interpret the string a custom target function returned
pub fn interpret_custom(value: &str) -> Option<ResolutionInstruction> {
    let value = value.trim();
    if let Some(preset) = Preset::from_keyword(value) {
        return Some(ResolutionInstruction::Preset(preset));
    }
    if let Some(tag) = value.strip_prefix('@') {
        if tag.is_empty() {
            return None;
        }
        return Some(tag_instruction(tag));
    }
    let literal = value.strip_prefix('v').unwrap_or(value);
    Version::parse(literal).ok().map(ResolutionInstruction::Pinned)
}

fn tag_instruction(tag: &str) -> ResolutionInstruction {
    if tag == LATEST_TAG {
        ResolutionInstruction::Preset(Preset::Latest)
    } else {
        ResolutionInstruction::Tag(tag.to_string())
    }
}
