//! Offline registry adapters
//!
//! `SnapshotRegistry` reads a JSON file mapping package names to npm-style
//! packuments (`dist-tags`, `versions`, `time`). `InMemoryRegistry` serves
//! metadata the caller built directly.

use crate::domain::{PackageMetadata, LATEST_TAG};
use crate::error::RegistryError;
use crate::registry::RegistryAdapter;
use crate::update::compare;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use semver::Version;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::trace;

const SNAPSHOT_REGISTRY: &str = "snapshot";
const MEMORY_REGISTRY: &str = "in-memory";

/// npm packument subset
#[derive(Debug, Clone, Deserialize)]
pub struct Packument {
    /// Dist-tag name to version
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
    /// Published versions (manifest bodies are ignored)
    #[serde(default)]
    versions: HashMap<String, serde_json::Value>,
    /// Publish time per version
    #[serde(default)]
    time: HashMap<String, String>,
}

impl Packument {
    /// Convert into package metadata
    pub fn to_metadata(&self, package: &str) -> Result<PackageMetadata, RegistryError> {
        let latest = self
            .dist_tags
            .get(LATEST_TAG)
            .ok_or_else(|| {
                RegistryError::invalid_response(
                    package,
                    SNAPSHOT_REGISTRY,
                    "missing latest dist-tag",
                )
            })
            .and_then(|raw| {
                Version::parse(raw).map_err(|e| {
                    RegistryError::invalid_response(
                        package,
                        SNAPSHOT_REGISTRY,
                        format!("latest dist-tag '{}': {}", raw, e),
                    )
                })
            })?;

        let mut published: Vec<(Version, Option<DateTime<Utc>>)> = self
            .versions
            .keys()
            .filter_map(|raw| match Version::parse(raw) {
                Ok(version) => {
                    let published_at = self
                        .time
                        .get(raw)
                        .and_then(|t| t.parse::<DateTime<Utc>>().ok());
                    Some((version, published_at))
                }
                Err(e) => {
                    trace!(package, version = %raw, error = %e, "skipping unparsable version");
                    None
                }
            })
            .collect();
        published.sort_by(|a, b| compare(&a.0, &b.0));

        let mut metadata = PackageMetadata::new(latest);
        for (version, published_at) in published {
            metadata = metadata.with_version(version, published_at);
        }
        for (tag, raw) in &self.dist_tags {
            if tag == LATEST_TAG {
                continue;
            }
            match Version::parse(raw) {
                Ok(version) => metadata = metadata.with_tag(tag.clone(), version),
                Err(e) => trace!(package, tag = %tag, error = %e, "skipping unparsable dist-tag"),
            }
        }

        Ok(metadata)
    }
}

/// Registry backed by a JSON snapshot of packuments
#[derive(Debug, Clone, Default)]
pub struct SnapshotRegistry {
    packages: HashMap<String, Packument>,
}

impl SnapshotRegistry {
    /// Parse a snapshot from JSON text
    pub fn from_json(content: &str, origin: &Path) -> Result<Self, RegistryError> {
        let packages: HashMap<String, Packument> = serde_json::from_str(content)
            .map_err(|e| RegistryError::load_error(SNAPSHOT_REGISTRY, origin, e.to_string()))?;
        Ok(Self { packages })
    }

    /// Load a snapshot file
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::load_error(SNAPSHOT_REGISTRY, path, e.to_string()))?;
        Self::from_json(&content, path)
    }

    /// Number of packages in the snapshot
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns true if the snapshot has no packages
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[async_trait]
impl RegistryAdapter for SnapshotRegistry {
    fn registry_name(&self) -> &'static str {
        SNAPSHOT_REGISTRY
    }

    async fn fetch_metadata(&self, package: &str) -> Result<PackageMetadata, RegistryError> {
        self.packages
            .get(package)
            .ok_or_else(|| RegistryError::package_not_found(package, SNAPSHOT_REGISTRY))?
            .to_metadata(package)
    }
}

/// Registry serving prebuilt metadata
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    packages: HashMap<String, PackageMetadata>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package
    pub fn with_package(mut self, name: impl Into<String>, metadata: PackageMetadata) -> Self {
        self.packages.insert(name.into(), metadata);
        self
    }
}

#[async_trait]
impl RegistryAdapter for InMemoryRegistry {
    fn registry_name(&self) -> &'static str {
        MEMORY_REGISTRY
    }

    async fn fetch_metadata(&self, package: &str) -> Result<PackageMetadata, RegistryError> {
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| RegistryError::package_not_found(package, MEMORY_REGISTRY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SNAPSHOT: &str = r#"{
        "ncu-test-tag": {
            "dist-tags": { "latest": "1.1.0", "next": "1.0.0-1", "broken": "nope" },
            "versions": { "1.1.0": {}, "0.1.0": {}, "1.0.0-1": {}, "not-a-version": {} },
            "time": { "1.1.0": "2021-03-01T00:00:00.000Z", "0.1.0": "2020-01-01T00:00:00.000Z" }
        },
        "no-latest": {
            "dist-tags": { "next": "1.0.0" },
            "versions": { "1.0.0": {} }
        }
    }"#;

    fn registry() -> SnapshotRegistry {
        SnapshotRegistry::from_json(SNAPSHOT, Path::new("snapshot.json")).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_metadata() {
        let meta = registry().fetch_metadata("ncu-test-tag").await.unwrap();
        assert_eq!(meta.latest(), &Version::new(1, 1, 0));
        assert_eq!(meta.tag("next"), Some(&Version::parse("1.0.0-1").unwrap()));
        assert!(meta.tag("broken").is_none());

        let versions: Vec<String> = meta.versions().iter().map(|v| v.version.to_string()).collect();
        assert_eq!(versions, vec!["0.1.0", "1.0.0-1", "1.1.0"]);
        assert_eq!(
            meta.versions()[2].published_at,
            Some(Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap())
        );
        assert!(meta.versions()[1].published_at.is_none());
    }

    #[tokio::test]
    async fn test_fetch_missing_package() {
        let err = registry().fetch_metadata("left-pad").await.unwrap_err();
        assert!(matches!(err, RegistryError::PackageNotFound { .. }));
    }

    #[tokio::test]
    async fn test_fetch_without_latest_tag() {
        let err = registry().fetch_metadata("no-latest").await.unwrap_err();
        assert!(err.to_string().contains("missing latest dist-tag"));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = SnapshotRegistry::from_json("[1, 2]", Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, RegistryError::LoadError { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_len() {
        assert_eq!(registry().len(), 2);
        assert!(!registry().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_registry() {
        let registry = InMemoryRegistry::new()
            .with_package("chalk", PackageMetadata::new(Version::new(5, 0, 0)));
        assert_eq!(registry.registry_name(), "in-memory");
        assert!(registry.fetch_metadata("chalk").await.is_ok());
        assert!(registry.fetch_metadata("mocha").await.is_err());
    }
}
