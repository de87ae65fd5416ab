//! Build plan handed to the packaging-metadata emitter

use crate::build::classifier::RebuildClassifier;
use crate::build::scheduler::schedule;
use crate::core::ArborResult;
use crate::graph::DependencyGraph;
use crate::resolver::{Pin, VersionResolver};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// One artifact that will be built in this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedArtifact {
    pub name: String,
    pub location: String,
    pub artifact_name: String,
    pub artifact_version: String,
    pub external_dependencies: BTreeSet<String>,
    pub pinned_dependencies: Vec<Pin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<String>,
}

/// Everything the emitter needs to produce packaging metadata for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub graph: String,
    pub build_stamp: String,
    pub to_build: BTreeSet<String>,
    pub to_reuse: BTreeSet<String>,
    /// Build order; each layer can be built in parallel
    pub layers: Vec<Vec<String>>,
    /// Artifacts to build, in layer order
    pub packages: Vec<PlannedArtifact>,
    /// System packages required by any candidate
    pub system_dependencies: BTreeSet<String>,
}

impl BuildPlan {
    /// Classify, schedule and resolve pins for `roots` (all packages if empty).
    pub fn create(
        graph: &DependencyGraph,
        roots: &[String],
        propagate_reverse: bool,
    ) -> ArborResult<Self> {
        let classification = RebuildClassifier::new(graph).build_list(roots, propagate_reverse);
        let layers = schedule(graph, &classification.to_build)?;
        let resolver = VersionResolver::new(graph, &classification.to_build)?;
        let naming = graph.naming()?;

        let mut packages = Vec::with_capacity(classification.to_build.len());
        for name in layers.iter().flatten() {
            let Some(package) = graph.get(name) else {
                continue;
            };
            packages.push(PlannedArtifact {
                name: package.name.clone(),
                location: package.location.clone(),
                artifact_name: naming.artifact_name(&package.name),
                artifact_version: resolver.minted_version(package),
                external_dependencies: package.external_dependencies.clone(),
                pinned_dependencies: resolver.pins_for(package)?,
                description: package.description.clone(),
                maintainers: package.maintainers.clone(),
            });
        }

        let system_dependencies = classification
            .candidates()
            .iter()
            .filter_map(|name| graph.get(name))
            .flat_map(|package| package.external_dependencies.iter().cloned())
            .collect();

        tracing::info!(
            graph = %graph.name(),
            layers = layers.len(),
            to_build = classification.to_build.len(),
            "Created build plan"
        );

        Ok(Self {
            graph: graph.name(),
            build_stamp: graph.build_stamp.clone(),
            to_build: classification.to_build,
            to_reuse: classification.to_reuse,
            layers,
            packages,
            system_dependencies,
        })
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> ArborResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the plan as JSON
    pub fn write(&self, path: &Path) -> ArborResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            crate::core::path::ensure_dir(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        tracing::debug!(path = %path.display(), "Wrote build plan");
        Ok(())
    }
}
