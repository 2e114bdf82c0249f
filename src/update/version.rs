//! Version comparison helpers
//!
//! Precedence follows semantic versioning: major, minor, patch, then the
//! prerelease identifiers, where a version without prerelease ranks above
//! any prerelease of the same triple. Build metadata never affects precedence.

use semver::Version;
use std::cmp::Ordering;

/// Compare two versions by semantic-version precedence
pub fn compare(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch)
        .cmp(&(b.major, b.minor, b.patch))
        // semver::Prerelease orders the empty prerelease above any other
        .then_with(|| a.pre.cmp(&b.pre))
}

/// Returns true if both versions share major.minor.patch
pub fn same_triple(a: &Version, b: &Version) -> bool {
    a.major == b.major && a.minor == b.minor && a.patch == b.patch
}

/// Returns true if the version carries prerelease identifiers
pub fn is_prerelease(v: &Version) -> bool {
    !v.pre.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_compare_triples() {
        assert_eq!(compare(&v("1.0.0"), &v("1.0.0")), Ordering::Equal);
        assert_eq!(compare(&v("1.0.0"), &v("2.0.0")), Ordering::Less);
        assert_eq!(compare(&v("1.10.0"), &v("1.9.0")), Ordering::Greater);
        assert_eq!(compare(&v("0.13.0"), &v("0.9.1")), Ordering::Greater);
    }

    #[test]
    fn test_compare_prerelease_below_release() {
        assert_eq!(compare(&v("1.0.0-1"), &v("1.0.0")), Ordering::Less);
        assert_eq!(compare(&v("1.1.0"), &v("1.1.1-beta.0")), Ordering::Less);
    }

    #[test]
    fn test_compare_prerelease_identifiers() {
        // numeric identifiers compare numerically
        assert_eq!(compare(&v("1.0.0-alpha.2"), &v("1.0.0-alpha.10")), Ordering::Less);
        // numeric ranks below alphanumeric
        assert_eq!(compare(&v("1.0.0-1"), &v("1.0.0-beta.0")), Ordering::Less);
        // lexical for strings
        assert_eq!(compare(&v("1.0.0-beta.0"), &v("1.0.0-task-42.0")), Ordering::Less);
        // a prefix ranks below the longer sequence
        assert_eq!(compare(&v("1.0.0-alpha"), &v("1.0.0-alpha.1")), Ordering::Less);
    }

    #[test]
    fn test_compare_ignores_build_metadata() {
        assert_eq!(compare(&v("1.0.0+a"), &v("1.0.0+b")), Ordering::Equal);
    }

    #[test]
    fn test_same_triple() {
        assert!(same_triple(&v("1.0.0-beta.0"), &v("1.0.0-task-42.0")));
        assert!(same_triple(&v("1.0.0"), &v("1.0.0-1")));
        assert!(!same_triple(&v("1.0.1-beta.0"), &v("1.0.0-task-42.0")));
    }

    #[test]
    fn test_is_prerelease() {
        assert!(is_prerelease(&v("19.3.0-canary-52684925-20251110")));
        assert!(!is_prerelease(&v("19.2.1")));
        assert!(!is_prerelease(&v("1.0.0+build.5")));
    }
}
