//! npm-style range declaration parser
//!
//! Classifies a raw declaration into a [`DeclaredRange`]. Only declarations
//! built around a single version are `Valid`; compound ranges, operators
//! without a version and non-semver locators are `Invalid`.

use crate::domain::{DeclaredRange, RangeOperator, RangeSpec, UnboundedKind};
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

static WILDCARD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[*xX]$").unwrap());
static SINGLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<op>\^|~>|~|>=|<=|>|<|=)?(?P<ws>\s*)(?P<v>v)?(?P<major>\d+)(?:\.(?P<minor>\d+|[xX*]))?(?:\.(?P<patch>\d+|[xX*]))?(?P<pre>-[0-9A-Za-z.-]+)?(?P<build>\+[0-9A-Za-z.-]+)?$",
    )
    .unwrap()
});

/// Parse a raw declaration. Never fails: anything unrecognized is `Invalid`.
pub fn parse_range(raw: &str) -> DeclaredRange {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return DeclaredRange::Unbounded(UnboundedKind::Empty);
    }

    if WILDCARD_RE.is_match(trimmed) {
        return DeclaredRange::Unbounded(UnboundedKind::Wildcard {
            raw: raw.to_string(),
        });
    }

    parse_single(raw, trimmed).unwrap_or_else(|| DeclaredRange::Invalid {
        raw: raw.to_string(),
    })
}

fn parse_single(raw: &str, trimmed: &str) -> Option<DeclaredRange> {
    let caps = SINGLE_RE.captures(trimmed)?;

    let parts = [
        caps.name("major").map(|m| m.as_str()),
        caps.name("minor").map(|m| m.as_str()),
        caps.name("patch").map(|m| m.as_str()),
    ];

    let mut numbers = [0u64; 3];
    let mut precision = 0u8;
    let mut suffix = String::new();
    for (i, part) in parts.iter().enumerate() {
        let Some(part) = part else { break };
        if is_wildcard(part) {
            suffix.push('.');
            suffix.push_str(part);
        } else if suffix.is_empty() {
            numbers[i] = part.parse().ok()?;
            precision += 1;
        } else {
            // `1.x.3` is not a range
            return None;
        }
    }

    let pre = caps.name("pre").map_or("", |m| m.as_str());
    let build = caps.name("build").map_or("", |m| m.as_str());
    if (!pre.is_empty() || !build.is_empty()) && precision < 3 {
        return None;
    }

    let version = Version::parse(&format!(
        "{}.{}.{}{}{}",
        numbers[0], numbers[1], numbers[2], pre, build
    ))
    .ok()?;

    let op = caps.name("op").map_or("", |m| m.as_str());
    let operator = match op {
        "^" => RangeOperator::Caret,
        "~" | "~>" => RangeOperator::Tilde,
        ">=" => RangeOperator::Gte,
        "=" => RangeOperator::Exact,
        "" if suffix.is_empty() => RangeOperator::Bare,
        _ => RangeOperator::Other,
    };

    let prefix = format!(
        "{}{}{}",
        op,
        caps.name("ws").map_or("", |m| m.as_str()),
        caps.name("v").map_or("", |m| m.as_str())
    );

    Some(DeclaredRange::Valid(
        RangeSpec::new(operator, raw, version)
            .with_prefix(prefix)
            .with_suffix(suffix)
            .with_precision(precision),
    ))
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(raw: &str) -> RangeSpec {
        match parse_range(raw) {
            DeclaredRange::Valid(spec) => spec,
            other => panic!("expected valid range for {:?}, got {:?}", raw, other),
        }
    }

    fn is_invalid(raw: &str) -> bool {
        matches!(parse_range(raw), DeclaredRange::Invalid { .. })
    }

    #[test]
    fn test_parse_bare() {
        let spec = spec("1.2.3");
        assert_eq!(spec.operator, RangeOperator::Bare);
        assert_eq!(spec.version, Version::new(1, 2, 3));
        assert_eq!(spec.prefix, "");
        assert_eq!(spec.precision, 3);
    }

    #[test]
    fn test_parse_exact() {
        let spec = spec("=1.2.3");
        assert_eq!(spec.operator, RangeOperator::Exact);
        assert_eq!(spec.prefix, "=");
    }

    #[test]
    fn test_parse_caret() {
        let spec = spec("^8.3.2");
        assert_eq!(spec.operator, RangeOperator::Caret);
        assert_eq!(spec.prefix, "^");
        assert_eq!(spec.raw, "^8.3.2");
    }

    #[test]
    fn test_parse_tilde_variants() {
        assert_eq!(spec("~36.1.0").operator, RangeOperator::Tilde);
        let pessimistic = spec("~>1.2.0");
        assert_eq!(pessimistic.operator, RangeOperator::Tilde);
        assert_eq!(pessimistic.prefix, "~>");
    }

    #[test]
    fn test_parse_comparators() {
        assert_eq!(spec(">=1.0.0").operator, RangeOperator::Gte);
        assert_eq!(spec(">1.0.0").operator, RangeOperator::Other);
        assert_eq!(spec("<=1.0.0").operator, RangeOperator::Other);
        assert_eq!(spec("<2.0.0").prefix, "<");
    }

    #[test]
    fn test_parse_keeps_whitespace_and_v_in_prefix() {
        assert_eq!(spec(">= 1.0.0").prefix, ">= ");
        let prefixed = spec("v1.2.3");
        assert_eq!(prefixed.operator, RangeOperator::Bare);
        assert_eq!(prefixed.prefix, "v");
    }

    #[test]
    fn test_parse_prerelease() {
        let spec = spec("1.0.0-task-42.0");
        assert_eq!(spec.version.pre.as_str(), "task-42.0");
        assert_eq!(spec.version.major, 1);
    }

    #[test]
    fn test_parse_partial() {
        let two = spec("^1.2");
        assert_eq!(two.version, Version::new(1, 2, 0));
        assert_eq!(two.precision, 2);

        let one = spec("2");
        assert_eq!(one.version, Version::new(2, 0, 0));
        assert_eq!(one.precision, 1);
    }

    #[test]
    fn test_parse_x_range() {
        let major = spec("1.x");
        assert_eq!(major.operator, RangeOperator::Other);
        assert_eq!(major.version, Version::new(1, 0, 0));
        assert_eq!(major.precision, 1);
        assert_eq!(major.suffix, ".x");

        let minor = spec("1.2.*");
        assert_eq!(minor.precision, 2);
        assert_eq!(minor.suffix, ".*");
    }

    #[test]
    fn test_parse_unbounded() {
        assert_eq!(
            parse_range(""),
            DeclaredRange::Unbounded(UnboundedKind::Empty)
        );
        assert_eq!(
            parse_range("   "),
            DeclaredRange::Unbounded(UnboundedKind::Empty)
        );
        assert_eq!(
            parse_range("*"),
            DeclaredRange::Unbounded(UnboundedKind::Wildcard {
                raw: "*".to_string()
            })
        );
        assert!(matches!(
            parse_range("x"),
            DeclaredRange::Unbounded(UnboundedKind::Wildcard { .. })
        ));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(is_invalid("~"));
        assert!(is_invalid("^"));
        assert!(is_invalid(">="));
        assert!(is_invalid("invalid range"));
        assert!(is_invalid("github:a/b"));
        assert!(is_invalid("latest"));
        assert!(is_invalid("file:../local"));
    }

    #[test]
    fn test_parse_compound_is_invalid() {
        assert!(is_invalid(">=1.0.0 <2.0.0"));
        assert!(is_invalid("1.0.0 - 2.0.0"));
        assert!(is_invalid("^1.0.0 || ^2.0.0"));
    }

    #[test]
    fn test_parse_malformed_is_invalid() {
        assert!(is_invalid("1.x.3"));
        assert!(is_invalid("1.2-beta"));
        assert!(is_invalid("1.2.3-"));
        assert!(is_invalid("99999999999999999999.0.0"));
    }

    #[test]
    fn test_invalid_keeps_raw() {
        assert_eq!(parse_range("github:a/b").raw(), "github:a/b");
    }
}
