//! Published artifact registry
//!
//! The registry is the record of what has already been built and published. A
//! snapshot is loaded from YAML and queried through [`ArtifactRegistry`]; the
//! newest applicable version of each package's artifact becomes that package's
//! published candidate.

pub mod consistency;

use crate::core::version::embedded_revision;
use crate::core::{ArborError, ArborResult};
use crate::di::ArtifactRegistry;
use crate::graph::DependencyGraph;
use crate::package::PublishedCandidate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub use consistency::{check_consistency, ConsistencyReport, PinConflict};

/// An exact `name=version` requirement recorded on a published artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPin {
    pub name: String,
    pub version: String,
}

/// One published version of an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedArtifact {
    pub name: String,
    pub version: String,
    /// Channels this version may be installed into
    #[serde(default)]
    pub channels: Vec<String>,
    /// Pins the artifact was built against
    #[serde(default)]
    pub depends: Vec<ArtifactPin>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    artifacts: Vec<PublishedArtifact>,
}

/// In-memory registry indexed by artifact name.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    artifacts: BTreeMap<String, Vec<PublishedArtifact>>,
}

impl RegistrySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a list of published artifacts
    pub fn from_artifacts<I>(artifacts: I) -> ArborResult<Self>
    where
        I: IntoIterator<Item = PublishedArtifact>,
    {
        let mut snapshot = Self::new();
        for artifact in artifacts {
            snapshot.add(artifact)?;
        }
        Ok(snapshot)
    }

    /// Load a registry snapshot file (`artifacts:` list)
    pub fn load(path: &Path) -> ArborResult<Self> {
        let content = fs::read_to_string(path)?;
        let file: RegistryFile = serde_yaml::from_str(&content).map_err(|e| {
            ArborError::Registry(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let snapshot = Self::from_artifacts(file.artifacts)?;
        tracing::debug!(
            path = %path.display(),
            artifacts = snapshot.len(),
            "Loaded registry snapshot"
        );
        Ok(snapshot)
    }

    /// Add a published artifact version
    pub fn add(&mut self, artifact: PublishedArtifact) -> ArborResult<()> {
        if artifact.name.trim().is_empty() {
            return Err(ArborError::Registry(
                "Artifact entry is missing a name".to_string(),
            ));
        }
        if artifact.version.trim().is_empty() {
            return Err(ArborError::Registry(format!(
                "Artifact '{}' has an entry without a version",
                artifact.name
            )));
        }

        self.artifacts
            .entry(artifact.name.clone())
            .or_default()
            .push(artifact);
        Ok(())
    }

    /// Number of distinct artifact names
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ArtifactRegistry for RegistrySnapshot {
    fn published(&self, artifact_name: &str) -> Vec<PublishedArtifact> {
        self.artifacts
            .get(artifact_name)
            .cloned()
            .unwrap_or_default()
    }
}

/// Look up the published candidate for every package in the graph.
///
/// Packages without an applicable artifact have their candidate cleared.
/// Returns the number of packages that received a candidate.
pub fn attach_candidates(
    graph: &mut DependencyGraph,
    registry: &dyn ArtifactRegistry,
    revision_length: usize,
) -> ArborResult<usize> {
    let naming = graph.naming()?;
    let channel = graph.channel().to_string();
    let mut attached = 0;

    for name in graph.names() {
        let artifact_name = naming.artifact_name(&name);
        let candidate = registry.newest(&artifact_name, &channel).map(|artifact| {
            let revision = embedded_revision(&artifact.version, revision_length);
            PublishedCandidate::new(artifact.version, revision)
        });

        match &candidate {
            Some(found) => {
                tracing::debug!(
                    package = %name,
                    version = %found.artifact_version,
                    "Found published candidate"
                );
                attached += 1;
            }
            None => tracing::debug!(package = %name, "No published candidate"),
        }

        graph.set_candidate(&name, candidate)?;
    }

    tracing::info!(
        graph = %graph.name(),
        attached,
        total = graph.len(),
        "Attached published candidates"
    );
    Ok(attached)
}
