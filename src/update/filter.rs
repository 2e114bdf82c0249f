//! Dependency filter gate
//!
//! This module provides the DependencyFilter struct that decides, before any
//! candidate is computed, whether a dependency takes part in resolution.

use crate::domain::DeclaredRange;
use crate::error::ConfigError;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Caller predicate: `false` drops the dependency
pub type FilterFn = dyn Fn(&str, &DeclaredRange) -> bool + Send + Sync;

/// A package name matcher
#[derive(Debug, Clone)]
pub enum PackagePattern {
    /// Exact package name
    Name(String),
    /// `/regex/` or a `*` glob compiled to a regex
    Regex(Regex),
}

impl PackagePattern {
    /// Parse a single pattern: `/re/`, a glob containing `*`, or a name
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        let invalid = |e: regex::Error| ConfigError::InvalidPattern {
            value: s.to_string(),
            message: e.to_string(),
        };

        if let Some(body) = s
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
            .filter(|body| !body.is_empty())
        {
            return Regex::new(body).map(PackagePattern::Regex).map_err(invalid);
        }

        if s.contains('*') {
            let body = s
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*");
            return Regex::new(&format!("^{}$", body))
                .map(PackagePattern::Regex)
                .map_err(invalid);
        }

        Ok(PackagePattern::Name(s.to_string()))
    }

    /// Parse a comma or whitespace separated list of patterns
    pub fn parse_list(s: &str) -> Result<Vec<Self>, ConfigError> {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .map(Self::parse)
            .collect()
    }

    /// Check whether a package name matches
    pub fn matches(&self, name: &str) -> bool {
        match self {
            PackagePattern::Name(n) => n == name,
            PackagePattern::Regex(re) => re.is_match(name),
        }
    }
}

/// Filter configuration for the gate
#[derive(Clone, Default)]
pub struct DependencyFilter {
    /// If non-empty, only matching packages are resolved
    pub filter: Vec<PackagePattern>,
    /// Matching packages are never resolved
    pub reject: Vec<PackagePattern>,
    /// Caller predicate evaluated after the name patterns
    pub predicate: Option<Arc<FilterFn>>,
}

impl DependencyFilter {
    /// Create a new DependencyFilter that lets everything through
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the include patterns
    pub fn with_filter(mut self, filter: Vec<PackagePattern>) -> Self {
        self.filter = filter;
        self
    }

    /// Set the exclude patterns
    pub fn with_reject(mut self, reject: Vec<PackagePattern>) -> Self {
        self.reject = reject;
        self
    }

    /// Set the caller predicate
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str, &DeclaredRange) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Check if a dependency should be resolved at all
    pub fn allows(&self, name: &str, range: &DeclaredRange) -> bool {
        if !self.filter.is_empty() && !self.filter.iter().any(|p| p.matches(name)) {
            return false;
        }
        if self.reject.iter().any(|p| p.matches(name)) {
            return false;
        }
        match &self.predicate {
            Some(predicate) => predicate(name, range),
            None => true,
        }
    }
}

impl fmt::Debug for DependencyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyFilter")
            .field("filter", &self.filter)
            .field("reject", &self.reject)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}
