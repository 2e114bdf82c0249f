//! Core domain models for deptarget
//!
//! This module contains the fundamental types used throughout the crate:
//! - Dependencies as declared in a manifest
//! - Declared ranges classified from their declaration
//! - Package metadata supplied by a registry
//! - Upgrade targets and resolution instructions
//! - Upgrade decisions

mod decision;
mod declared_range;
mod dependency;
mod metadata;
mod target;

pub use decision::{RejectReason, UpgradeDecision};
pub use dependency::{Dependency, DependencySection};
pub use declared_range::{DeclaredRange, RangeOperator, RangeSpec, UnboundedKind};
pub use metadata::{PackageMetadata, PublishedVersion, LATEST_TAG};
pub use target::{Preset, ResolutionInstruction, TargetFn, TargetSpec};
