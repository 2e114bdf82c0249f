//! Dependency information structures

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The manifest section a dependency was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencySection {
    /// `dependencies`
    Prod,
    /// `devDependencies`
    Dev,
    /// `optionalDependencies`
    Optional,
    /// `peerDependencies`
    Peer,
}

impl DependencySection {
    /// All sections, in the order they are read
    pub const ALL: [DependencySection; 4] = [
        DependencySection::Prod,
        DependencySection::Dev,
        DependencySection::Optional,
        DependencySection::Peer,
    ];

    /// The package.json key for this section
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencySection::Prod => "dependencies",
            DependencySection::Dev => "devDependencies",
            DependencySection::Optional => "optionalDependencies",
            DependencySection::Peer => "peerDependencies",
        }
    }

    /// Short name used on the command line
    pub fn short_name(&self) -> &'static str {
        match self {
            DependencySection::Prod => "prod",
            DependencySection::Dev => "dev",
            DependencySection::Optional => "optional",
            DependencySection::Peer => "peer",
        }
    }
}

impl FromStr for DependencySection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.short_name() == s || section.manifest_key() == s)
            .ok_or_else(|| ConfigError::InvalidSection {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for DependencySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// A dependency as declared in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name
    pub name: String,
    /// The raw declaration string
    pub declaration: String,
    /// Where it was declared
    pub section: DependencySection,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(
        name: impl Into<String>,
        declaration: impl Into<String>,
        section: DependencySection,
    ) -> Self {
        Self {
            name: name.into(),
            declaration: declaration.into(),
            section,
        }
    }

    /// Creates a new production dependency
    pub fn production(name: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self::new(name, declaration, DependencySection::Prod)
    }

    /// Returns true if this is a development dependency
    pub fn is_dev(&self) -> bool {
        self.section == DependencySection::Dev
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev_marker = if self.is_dev() { " (dev)" } else { "" };
        write!(f, "{}@{}{}", self.name, self.declaration, dev_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_from_str() {
        assert_eq!("dev".parse::<DependencySection>().unwrap(), DependencySection::Dev);
        assert_eq!(
            "peerDependencies".parse::<DependencySection>().unwrap(),
            DependencySection::Peer
        );
        assert!("bundled".parse::<DependencySection>().is_err());
    }

    #[test]
    fn test_section_keys() {
        assert_eq!(DependencySection::Prod.manifest_key(), "dependencies");
        assert_eq!(DependencySection::Optional.to_string(), "optional");
    }

    #[test]
    fn test_dependency_display() {
        let dep = Dependency::new("typescript", "~5.0.0", DependencySection::Dev);
        assert!(dep.is_dev());
        assert_eq!(dep.to_string(), "typescript@~5.0.0 (dev)");

        let prod = Dependency::production("chalk", "^2.3.0");
        assert_eq!(prod.to_string(), "chalk@^2.3.0");
    }
}
