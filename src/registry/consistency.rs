//! Registry consistency check
//!
//! Every published candidate records the exact versions of the in-graph
//! artifacts it was built against. When one of those versions is no longer the
//! candidate for its artifact, installing the candidate would fail, so the
//! pin is reported as a conflict.

use crate::core::version::ArtifactVersion;
use crate::core::ArborResult;
use crate::di::ArtifactRegistry;
use crate::graph::DependencyGraph;
use serde::Serialize;
use std::collections::BTreeMap;

/// A recorded pin that does not match the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinConflict {
    /// Pinned artifact name
    pub dependency: String,
    /// Version the pin requires
    pub pinned: String,
    /// Current candidate version for the pinned artifact, if any
    pub available: Option<String>,
    /// Source revision the pinned version was built from, when it is a minted version
    pub pinned_revision: Option<String>,
}

/// Conflicts grouped by the artifact carrying the broken pin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    pub conflicts: BTreeMap<String, Vec<PinConflict>>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of artifacts with at least one broken pin
    pub fn broken_artifacts(&self) -> usize {
        self.conflicts.len()
    }

    fn add(&mut self, artifact: &str, conflict: PinConflict) {
        self.conflicts
            .entry(artifact.to_string())
            .or_default()
            .push(conflict);
    }
}

/// Check the pins of every published candidate in `graph`.
///
/// Pins on artifacts outside the graph's prefix (system packages) and on the
/// channel's bootstrap artifact are ignored.
pub fn check_consistency(
    graph: &DependencyGraph,
    registry: &dyn ArtifactRegistry,
) -> ArborResult<ConsistencyReport> {
    let naming = graph.naming()?;
    let bootstrap = format!("{}-bootstrap", naming.prefix());
    let mut report = ConsistencyReport::default();

    for package in graph.packages() {
        let Some(candidate) = &package.published_candidate else {
            continue;
        };

        let artifact_name = naming.artifact_name(&package.name);
        let Some(published) = registry
            .published(&artifact_name)
            .into_iter()
            .find(|artifact| artifact.version == candidate.artifact_version)
        else {
            tracing::warn!(
                artifact = %artifact_name,
                version = %candidate.artifact_version,
                "Candidate version missing from registry"
            );
            continue;
        };

        for pin in &published.depends {
            if !naming.owns(&pin.name) || pin.name == bootstrap {
                continue;
            }

            let available = graph
                .package_for_artifact(&pin.name)
                .and_then(|dependency| dependency.published_candidate.as_ref())
                .map(|dependency| dependency.artifact_version.clone());

            if available.as_deref() != Some(pin.version.as_str()) {
                tracing::warn!(
                    artifact = %artifact_name,
                    dependency = %pin.name,
                    pinned = %pin.version,
                    "Pinned version is not available"
                );
                report.add(
                    &artifact_name,
                    PinConflict {
                        dependency: pin.name.clone(),
                        pinned: pin.version.clone(),
                        available,
                        pinned_revision: ArtifactVersion::parse(&pin.version)
                            .ok()
                            .map(|minted| minted.revision),
                    },
                );
            }
        }
    }

    tracing::info!(
        graph = %graph.name(),
        broken = report.broken_artifacts(),
        "Checked registry consistency"
    );
    Ok(report)
}
