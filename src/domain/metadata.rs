//! Package metadata supplied by a registry
//!
//! This module provides the published version list (with optional publish
//! timestamps) and the dist-tag mapping for a single package.

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the dist-tag every package carries
pub const LATEST_TAG: &str = "latest";

/// A published version and when it was published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedVersion {
    /// The version
    pub version: Version,
    /// When this version was published, if the registry reported it
    pub published_at: Option<DateTime<Utc>>,
}

impl PublishedVersion {
    /// Create a new PublishedVersion
    pub fn new(version: Version, published_at: Option<DateTime<Utc>>) -> Self {
        Self {
            version,
            published_at,
        }
    }

    /// Returns true if this version is a prerelease
    pub fn is_prerelease(&self) -> bool {
        !self.version.pre.is_empty()
    }
}

/// Registry view of one package: published versions and dist-tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    versions: Vec<PublishedVersion>,
    tags: BTreeMap<String, Version>,
}

impl PackageMetadata {
    /// Create metadata whose `latest` tag points at `latest`
    pub fn new(latest: Version) -> Self {
        let mut tags = BTreeMap::new();
        tags.insert(LATEST_TAG.to_string(), latest);
        Self {
            versions: Vec::new(),
            tags,
        }
    }

    /// Add a published version
    pub fn with_version(mut self, version: Version, published_at: Option<DateTime<Utc>>) -> Self {
        self.versions.push(PublishedVersion::new(version, published_at));
        self
    }

    /// Add (or move) a dist-tag
    pub fn with_tag(mut self, name: impl Into<String>, version: Version) -> Self {
        self.tags.insert(name.into(), version);
        self
    }

    /// All published versions, in registry order
    pub fn versions(&self) -> &[PublishedVersion] {
        &self.versions
    }

    /// Look up a dist-tag
    pub fn tag(&self, name: &str) -> Option<&Version> {
        self.tags.get(name)
    }

    /// The version the `latest` dist-tag points at
    pub fn latest(&self) -> &Version {
        // `new` always inserts the latest tag and `with_tag` can only move it
        &self.tags[LATEST_TAG]
    }

    /// All dist-tags
    pub fn tags(&self) -> &BTreeMap<String, Version> {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_new_has_latest_tag() {
        let meta = PackageMetadata::new(v("1.1.0"));
        assert_eq!(meta.latest(), &v("1.1.0"));
        assert_eq!(meta.tag("latest"), Some(&v("1.1.0")));
        assert!(meta.versions().is_empty());
    }

    #[test]
    fn test_with_tag_moves_latest() {
        let meta = PackageMetadata::new(v("1.0.0")).with_tag("latest", v("2.0.0"));
        assert_eq!(meta.latest(), &v("2.0.0"));
    }

    #[test]
    fn test_missing_tag() {
        let meta = PackageMetadata::new(v("1.0.0")).with_tag("next", v("2.0.0-rc.1"));
        assert_eq!(meta.tag("next"), Some(&v("2.0.0-rc.1")));
        assert!(meta.tag("beta").is_none());
        assert_eq!(meta.tags().len(), 2);
    }

    #[test]
    fn test_published_version_prerelease() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let meta = PackageMetadata::new(v("1.0.0"))
            .with_version(v("1.0.0"), Some(date))
            .with_version(v("2.0.0-alpha.0"), None);
        assert!(!meta.versions()[0].is_prerelease());
        assert!(meta.versions()[1].is_prerelease());
        assert_eq!(meta.versions()[0].published_at, Some(date));
    }
}
