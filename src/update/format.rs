//! Result formatting
//!
//! Rebuilds the declaration for an accepted version using the current
//! declaration's prefix, precision and wildcard suffix.

use crate::domain::{DeclaredRange, UnboundedKind};
use semver::Version;

/// Format `version` the way `current` was written
pub fn format_upgrade(current: &DeclaredRange, version: &Version) -> String {
    match current {
        DeclaredRange::Valid(spec) => {
            let exact = !version.pre.is_empty() || !version.build.is_empty();
            if exact {
                // prerelease targets cannot be expressed as partial versions
                return format!("{}{}", spec.prefix, version);
            }
            let parts = [version.major, version.minor, version.patch];
            let body = parts
                .iter()
                .take(spec.precision as usize)
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(".");
            format!("{}{}{}", spec.prefix, body, spec.suffix)
        }
        // a wildcard already admits every version
        DeclaredRange::Unbounded(UnboundedKind::Wildcard { raw }) => raw.clone(),
        DeclaredRange::Unbounded(UnboundedKind::Empty) | DeclaredRange::Invalid { .. } => {
            version.to_string()
        }
    }
}
