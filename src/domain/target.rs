//! Upgrade targets
//!
//! A target says which version a dependency should move to: one of the
//! preset policies, a registry dist-tag, or a caller-supplied function that
//! decides per dependency.

use super::DeclaredRange;
use crate::error::ConfigError;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Preset upgrade policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// The version the `latest` dist-tag points at
    #[default]
    Latest,
    /// The most recently published version
    Newest,
    /// The highest version by precedence
    Greatest,
    /// The highest version with the same major
    Minor,
    /// The highest version with the same major.minor
    Patch,
    /// The highest version satisfying the declared range
    Semver,
}

impl Preset {
    /// All presets, in keyword order
    pub const ALL: [Preset; 6] = [
        Preset::Latest,
        Preset::Newest,
        Preset::Greatest,
        Preset::Minor,
        Preset::Patch,
        Preset::Semver,
    ];

    /// The keyword used on the command line and by custom targets
    pub fn keyword(&self) -> &'static str {
        match self {
            Preset::Latest => "latest",
            Preset::Newest => "newest",
            Preset::Greatest => "greatest",
            Preset::Minor => "minor",
            Preset::Patch => "patch",
            Preset::Semver => "semver",
        }
    }

    /// Parse a preset keyword
    pub fn from_keyword(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == s)
    }

    /// Returns true if selection under this preset needs a declared version
    pub fn requires_bound(&self) -> bool {
        matches!(self, Preset::Minor | Preset::Patch | Preset::Semver)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Per-dependency target function: receives the dependency name and its
/// declared ranges, returns a preset keyword, an `@tag`, or a literal version
pub type TargetFn = dyn Fn(&str, &[DeclaredRange]) -> String + Send + Sync;

/// What the caller asked to upgrade to
#[derive(Clone)]
pub enum TargetSpec {
    /// One preset for every dependency
    Preset(Preset),
    /// One dist-tag for every dependency
    Tag(String),
    /// Decided per dependency
    Custom(Arc<TargetFn>),
}

impl TargetSpec {
    /// Wrap a closure as a custom target
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str, &[DeclaredRange]) -> String + Send + Sync + 'static,
    {
        TargetSpec::Custom(Arc::new(f))
    }
}

impl Default for TargetSpec {
    fn default() -> Self {
        TargetSpec::Preset(Preset::default())
    }
}

impl FromStr for TargetSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(tag) = s.strip_prefix('@') {
            if tag.is_empty() {
                return Err(ConfigError::InvalidTarget {
                    value: s.to_string(),
                });
            }
            return Ok(TargetSpec::Tag(tag.to_string()));
        }
        Preset::from_keyword(s)
            .map(TargetSpec::Preset)
            .ok_or_else(|| ConfigError::InvalidTarget {
                value: s.to_string(),
            })
    }
}

impl fmt::Debug for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSpec::Preset(p) => f.debug_tuple("Preset").field(p).finish(),
            TargetSpec::Tag(t) => f.debug_tuple("Tag").field(t).finish(),
            TargetSpec::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSpec::Preset(p) => write!(f, "{}", p),
            TargetSpec::Tag(t) => write!(f, "@{}", t),
            TargetSpec::Custom(_) => write!(f, "custom"),
        }
    }
}

/// The concrete directive used to pick a candidate for one dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionInstruction {
    /// Select by preset policy
    Preset(Preset),
    /// Select the version a dist-tag points at
    Tag(String),
    /// A version chosen directly by a custom target
    Pinned(Version),
}

impl ResolutionInstruction {
    /// Returns true if this instruction cannot work without a declared version
    pub fn requires_bound(&self) -> bool {
        match self {
            ResolutionInstruction::Preset(p) => p.requires_bound(),
            ResolutionInstruction::Tag(_) | ResolutionInstruction::Pinned(_) => false,
        }
    }
}

impl fmt::Display for ResolutionInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionInstruction::Preset(p) => write!(f, "{}", p),
            ResolutionInstruction::Tag(t) => write!(f, "@{}", t),
            ResolutionInstruction::Pinned(v) => write!(f, "={}", v),
        }
    }
}
