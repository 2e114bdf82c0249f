//! Registry adapters for obtaining package metadata
//!
//! This module provides:
//! - The adapter trait the orchestrator fetches metadata through
//! - An offline adapter reading npm-style packuments from a JSON snapshot
//! - An in-memory adapter for callers that build metadata themselves

mod snapshot;

pub use snapshot::{InMemoryRegistry, Packument, SnapshotRegistry};

use crate::domain::PackageMetadata;
use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for registry adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch metadata for a package
    async fn fetch_metadata(&self, package: &str) -> Result<PackageMetadata, RegistryError>;
}
