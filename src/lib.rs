//! deptarget - dependency upgrade target resolver library
//!
//! Decides, for each declared dependency, which published version it should
//! move to and how the new declaration is written:
//! - Presets: latest, newest, greatest, minor, patch, semver
//! - Dist-tag targets (`@next`, `@beta`, ...)
//! - Custom per-dependency target functions
//! - A filter gate that runs before any target logic

pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod registry;
pub mod update;

pub use domain::{DeclaredRange, PackageMetadata, Preset, TargetSpec, UpgradeDecision};
pub use update::{upgrade_dependencies, UpgradeJudge, UpgradeOptions};
