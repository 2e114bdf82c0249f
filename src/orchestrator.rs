//! Upgrade orchestrator for coordinating a resolution run
//!
//! This module provides:
//! - Workflow coordination: gate → fetch → resolve → report
//! - Parallel registry queries with a concurrency limit
//! - Error handling with partial continuation

use crate::domain::{Dependency, RejectReason, UpgradeDecision};
use crate::parser::parse_range;
use crate::registry::RegistryAdapter;
use crate::update::{UpgradeJudge, UpgradeOptions};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Default concurrency limit for registry requests
const DEFAULT_CONCURRENCY: usize = 10;

/// Configuration for the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Maximum concurrent registry requests
    pub concurrency: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Errors that can occur during orchestration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// Failed to fetch metadata from the registry
    RegistryError { package: String, message: String },
    /// A resolution task did not complete
    TaskError(String),
}

impl std::fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorError::RegistryError { package, message } => {
                write!(f, "Failed to fetch {}: {}", package, message)
            }
            OrchestratorError::TaskError(msg) => write!(f, "Resolution task failed: {}", msg),
        }
    }
}

impl std::error::Error for OrchestratorError {}

/// The decision taken for one dependency
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyOutcome {
    /// The dependency as declared
    pub dependency: Dependency,
    /// What happened to it
    pub decision: UpgradeDecision,
}

/// Result of a resolution run
#[derive(Debug, Clone, Default)]
pub struct UpgradeReport {
    /// One outcome per dependency, sorted by name
    pub outcomes: Vec<DependencyOutcome>,
    /// Errors encountered during processing
    pub errors: Vec<OrchestratorError>,
}

impl UpgradeReport {
    /// Dependencies with an accepted upgrade, mapped to their new declaration
    pub fn upgraded(&self) -> BTreeMap<String, String> {
        self.outcomes
            .iter()
            .filter_map(|outcome| {
                outcome
                    .decision
                    .declaration()
                    .map(|decl| (outcome.dependency.name.clone(), decl.to_string()))
            })
            .collect()
    }

    /// Every dependency, with accepted upgrades applied
    pub fn merged(&self) -> BTreeMap<String, String> {
        self.outcomes
            .iter()
            .map(|outcome| {
                let declaration = outcome
                    .decision
                    .declaration()
                    .unwrap_or(outcome.dependency.declaration.as_str());
                (outcome.dependency.name.clone(), declaration.to_string())
            })
            .collect()
    }

    /// Outcomes with an accepted upgrade
    pub fn accepted(&self) -> impl Iterator<Item = &DependencyOutcome> {
        self.outcomes.iter().filter(|o| o.decision.is_accepted())
    }

    /// Returns true if any dependency could not be resolved because of an error
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Orchestrator for coordinating a resolution run
pub struct Orchestrator {
    /// Registry metadata source
    registry: Arc<dyn RegistryAdapter>,
    /// Shared decision engine
    judge: Arc<UpgradeJudge>,
    /// Semaphore for concurrency control
    semaphore: Arc<Semaphore>,
}

impl Orchestrator {
    /// Create a new orchestrator with the default configuration
    pub fn new(registry: Arc<dyn RegistryAdapter>, options: UpgradeOptions) -> Self {
        Self::with_config(registry, options, OrchestratorConfig::default())
    }

    /// Create an orchestrator with an explicit configuration
    pub fn with_config(
        registry: Arc<dyn RegistryAdapter>,
        options: UpgradeOptions,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            registry,
            judge: Arc::new(UpgradeJudge::new(options)),
            semaphore: Arc::new(Semaphore::new(config.concurrency.max(1))),
        }
    }

    /// Resolve every dependency
    pub async fn run(&self, dependencies: Vec<Dependency>) -> UpgradeReport {
        let mut report = UpgradeReport::default();
        let mut tasks = JoinSet::new();
        // Dependencies whose task has not reported back yet, by spawn order
        let mut pending: Vec<Option<Dependency>> = Vec::new();

        for dependency in dependencies {
            let range = parse_range(&dependency.declaration);

            // Gate first: a filtered dependency never reaches the registry
            if let Some(reason) = self.judge.should_skip(&dependency.name, &range) {
                report.outcomes.push(DependencyOutcome {
                    dependency,
                    decision: UpgradeDecision::rejected(reason),
                });
                continue;
            }

            let index = pending.len();
            pending.push(Some(dependency.clone()));
            let registry = Arc::clone(&self.registry);
            let judge = Arc::clone(&self.judge);
            let semaphore = Arc::clone(&self.semaphore);

            tasks.spawn(async move {
                let fetched = match semaphore.acquire_owned().await {
                    Ok(_permit) => registry
                        .fetch_metadata(&dependency.name)
                        .await
                        .map_err(|e| e.to_string()),
                    Err(e) => Err(e.to_string()),
                };
                let decision = match fetched {
                    Ok(metadata) => judge.decide(&dependency.name, &range, &metadata),
                    Err(message) => UpgradeDecision::rejected(RejectReason::FetchFailed(message)),
                };
                let outcome = DependencyOutcome {
                    dependency,
                    decision,
                };
                (index, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => {
                    pending[index].take();
                    if let Some(RejectReason::FetchFailed(message)) = outcome.decision.reason() {
                        warn!(dependency = %outcome.dependency.name, error = %message, "fetch failed");
                        report.errors.push(OrchestratorError::RegistryError {
                            package: outcome.dependency.name.clone(),
                            message: message.clone(),
                        });
                    }
                    report.outcomes.push(outcome);
                }
                Err(e) => {
                    warn!(error = %e, "resolution task failed");
                    report.errors.push(OrchestratorError::TaskError(e.to_string()));
                }
            }
        }

        // A failed task still leaves its dependency in the report
        for dependency in pending.into_iter().flatten() {
            report.outcomes.push(DependencyOutcome {
                dependency,
                decision: UpgradeDecision::rejected(RejectReason::TaskFailed),
            });
        }

        report
            .outcomes
            .sort_by(|a, b| a.dependency.name.cmp(&b.dependency.name));
        debug!(
            registry = self.registry.registry_name(),
            total = report.outcomes.len(),
            upgraded = report.accepted().count(),
            errors = report.errors.len(),
            "resolution finished"
        );
        report
    }
}
