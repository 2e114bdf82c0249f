//! Upgrade decision result types

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason why a dependency was left out of the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Vetoed by the filter gate
    Filtered,
    /// The custom target returned something unusable
    NoInstruction,
    /// No version matched the instruction (or the tag is missing)
    NoCandidate,
    /// The instruction needs a declared version and there is none
    Unbounded,
    /// The candidate does not move the dependency forward
    NotGreater,
    /// The new declaration would be identical to the current one
    Unchanged,
    /// Registry metadata could not be fetched
    FetchFailed(String),
    /// The resolution task panicked or was cancelled
    TaskFailed,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Filtered => write!(f, "filtered"),
            RejectReason::NoInstruction => write!(f, "no usable target"),
            RejectReason::NoCandidate => write!(f, "no candidate version"),
            RejectReason::Unbounded => write!(f, "no version bound"),
            RejectReason::NotGreater => write!(f, "not an upgrade"),
            RejectReason::Unchanged => write!(f, "unchanged"),
            RejectReason::FetchFailed(msg) => write!(f, "fetch failed: {}", msg),
            RejectReason::TaskFailed => write!(f, "resolution task failed"),
        }
    }
}

/// Outcome of resolving one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpgradeDecision {
    /// Upgrade to `declaration`
    Accepted {
        /// The new declaration string
        declaration: String,
        /// The version the declaration was built from
        version: Version,
    },
    /// No upgrade
    Rejected {
        /// Why
        reason: RejectReason,
    },
}

impl UpgradeDecision {
    /// Creates an Accepted decision
    pub fn accepted(declaration: impl Into<String>, version: Version) -> Self {
        UpgradeDecision::Accepted {
            declaration: declaration.into(),
            version,
        }
    }

    /// Creates a Rejected decision
    pub fn rejected(reason: RejectReason) -> Self {
        UpgradeDecision::Rejected { reason }
    }

    /// Returns true if this is an accepted upgrade
    pub fn is_accepted(&self) -> bool {
        matches!(self, UpgradeDecision::Accepted { .. })
    }

    /// Returns the new declaration, if accepted
    pub fn declaration(&self) -> Option<&str> {
        match self {
            UpgradeDecision::Accepted { declaration, .. } => Some(declaration),
            UpgradeDecision::Rejected { .. } => None,
        }
    }

    /// Returns the reject reason, if rejected
    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            UpgradeDecision::Accepted { .. } => None,
            UpgradeDecision::Rejected { reason } => Some(reason),
        }
    }
}

impl fmt::Display for UpgradeDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeDecision::Accepted { declaration, .. } => write!(f, "-> {}", declaration),
            UpgradeDecision::Rejected { reason } => write!(f, "skip ({})", reason),
        }
    }
}
