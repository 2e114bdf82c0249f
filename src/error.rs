//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues reading the dependency manifest
//! - RegistryError: Issues obtaining package metadata
//! - ConfigError: Issues with caller/CLI configuration
//!
//! The resolution core itself never fails; these only surface from the
//! collaborators around it.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },
}

/// Errors related to package registry access
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Registry data could not be loaded
    #[error("failed to load {registry} registry from {path}: {message}")]
    LoadError {
        registry: String,
        path: PathBuf,
        message: String,
    },

    /// Invalid metadata for a package
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Unknown target keyword
    #[error("invalid target '{value}': expected latest, newest, greatest, minor, patch, semver or @tag")]
    InvalidTarget { value: String },

    /// Bad filter/reject pattern
    #[error("invalid package pattern '{value}': {message}")]
    InvalidPattern { value: String, message: String },

    /// Unknown dependency section
    #[error("invalid dependency section '{value}': expected prod, dev, optional or peer")]
    InvalidSection { value: String },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new LoadError
    pub fn load_error(
        registry: impl Into<String>,
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::LoadError {
            registry: registry.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_error_not_found() {
        let err = ManifestError::not_found("/path/to/package.json");
        let msg = format!("{}", err);
        assert!(msg.contains("manifest file not found"));
        assert!(msg.contains("package.json"));
    }

    #[test]
    fn test_manifest_error_json_parse() {
        let err = ManifestError::json_parse_error("/path/to/package.json", "unexpected token");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse JSON"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn test_registry_error_package_not_found() {
        let err = RegistryError::package_not_found("nonexistent-package", "snapshot");
        let msg = format!("{}", err);
        assert!(msg.contains("package 'nonexistent-package' not found"));
        assert!(msg.contains("snapshot"));
    }

    #[test]
    fn test_registry_error_invalid_response() {
        let err = RegistryError::invalid_response("chalk", "snapshot", "missing latest dist-tag");
        let msg = format!("{}", err);
        assert!(msg.contains("chalk"));
        assert!(msg.contains("missing latest dist-tag"));
    }

    #[test]
    fn test_config_error_invalid_target() {
        let err = ConfigError::InvalidTarget {
            value: "biggest".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("invalid target 'biggest'"));
    }

    #[test]
    fn test_app_error_from_registry_error() {
        let registry_err = RegistryError::package_not_found("pkg", "snapshot");
        let app_err: AppError = registry_err.into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("package 'pkg' not found"));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let config_err = ConfigError::InvalidSection {
            value: "bundled".to_string(),
        };
        let app_err: AppError = config_err.into();
        assert!(format!("{}", app_err).contains("bundled"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = ManifestError::not_found("/test");
        let debug = format!("{:?}", err);
        assert!(debug.contains("NotFound"));
    }
}
