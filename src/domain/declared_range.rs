//! Declared dependency ranges
//!
//! Handles npm-style declarations like:
//! - Exact: `=1.2.3`, bare `1.2.3`, `v1.2.3`
//! - Caret / tilde: `^1.2.3`, `~1.2.3`, `~>1.2`
//! - Comparison: `>=1.2.3`, `>1.2.3`, `<=1.2.3`
//! - X-ranges: `1.x`, `1.2.*`
//! - Unbounded: `*`, empty string
//!
//! Anything else (VCS locators, compound ranges, free text) is `Invalid`.

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The operator of a single-version declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeOperator {
    /// Explicit equality (e.g., `=1.2.3`)
    Exact,
    /// Caret range (e.g., `^1.2.3`) - compatible with major version
    Caret,
    /// Tilde range (e.g., `~1.2.3`) - compatible with minor version
    Tilde,
    /// Greater than or equal (e.g., `>=1.2.3`)
    Gte,
    /// Any other single comparator or x-range (e.g., `>1.2.3`, `1.x`)
    Other,
    /// No operator at all (e.g., `1.2.3`)
    Bare,
}

impl RangeOperator {
    /// Returns the operator symbol as written in the canonical form
    pub fn symbol(&self) -> &'static str {
        match self {
            RangeOperator::Exact => "=",
            RangeOperator::Caret => "^",
            RangeOperator::Tilde => "~",
            RangeOperator::Gte => ">=",
            RangeOperator::Other | RangeOperator::Bare => "",
        }
    }
}

/// A successfully parsed single-version declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSpec {
    /// The operator class
    pub operator: RangeOperator,
    /// The raw declaration as it appears in the manifest
    pub raw: String,
    /// The declared version, completed with zeros when partial
    pub version: Version,
    /// Operator text to reapply on upgrade (e.g., `^`, `~>`, `v`)
    pub prefix: String,
    /// Trailing wildcard segment to reapply (e.g., `.x`)
    pub suffix: String,
    /// Number of version components actually written (1..=3)
    pub precision: u8,
}

impl RangeSpec {
    /// Creates a new RangeSpec with full precision and no prefix or suffix
    pub fn new(operator: RangeOperator, raw: impl Into<String>, version: Version) -> Self {
        Self {
            operator,
            raw: raw.into(),
            version,
            prefix: String::new(),
            suffix: String::new(),
            precision: 3,
        }
    }

    /// Sets the prefix to preserve during upgrades
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the suffix to preserve during upgrades
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Sets the number of written version components
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision.clamp(1, 3);
        self
    }
}

/// Why a declaration admits any version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnboundedKind {
    /// A wildcard such as `*` or `x`
    Wildcard { raw: String },
    /// An empty declaration
    Empty,
}

/// A classified dependency declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeclaredRange {
    /// A single-version declaration with a known operator
    Valid(RangeSpec),
    /// A declaration without a lower bound
    Unbounded(UnboundedKind),
    /// Anything that is not a recognized single-version range
    Invalid { raw: String },
}

impl DeclaredRange {
    /// Returns the raw declaration text
    pub fn raw(&self) -> &str {
        match self {
            DeclaredRange::Valid(spec) => &spec.raw,
            DeclaredRange::Unbounded(UnboundedKind::Wildcard { raw }) => raw,
            DeclaredRange::Unbounded(UnboundedKind::Empty) => "",
            DeclaredRange::Invalid { raw } => raw,
        }
    }

    /// Returns the declared version, if any
    pub fn version(&self) -> Option<&Version> {
        match self {
            DeclaredRange::Valid(spec) => Some(&spec.version),
            _ => None,
        }
    }

    /// Returns the operator, if the declaration is valid
    pub fn operator(&self) -> Option<RangeOperator> {
        match self {
            DeclaredRange::Valid(spec) => Some(spec.operator),
            _ => None,
        }
    }

    /// Returns the declared major version, if any
    pub fn major(&self) -> Option<u64> {
        self.version().map(|v| v.major)
    }

    /// Returns true if the declaration carries a usable lower bound
    pub fn is_bounded(&self) -> bool {
        matches!(self, DeclaredRange::Valid(_))
    }

    /// Returns true if the declared version is a prerelease
    pub fn is_prerelease(&self) -> bool {
        self.version().is_some_and(|v| !v.pre.is_empty())
    }
}

impl fmt::Display for DeclaredRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}
