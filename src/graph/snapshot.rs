//! Graph snapshots on disk (one YAML file per environment/channel)

use crate::core::path::{ensure_dir, graph_file, yaml_files};
use crate::core::{ArborError, ArborResult};
use crate::graph::DependencyGraph;
use std::fs;
use std::path::{Path, PathBuf};

impl DependencyGraph {
    /// Write the graph to `<dir>/<name>.yaml`, returning the file path.
    ///
    /// Reverse dependencies are not written; they are recomputed on load.
    pub fn write_yaml(&self, dir: &Path) -> ArborResult<PathBuf> {
        ensure_dir(dir)?;
        let path = graph_file(dir, &self.name());

        let content = serde_yaml::to_string(self)
            .map_err(|e| ArborError::Config(format!("Failed to serialize graph: {}", e)))?;
        fs::write(&path, content)?;

        tracing::info!(path = %path.display(), packages = self.len(), "Wrote graph snapshot");
        Ok(path)
    }

    /// Load and finalize a graph snapshot.
    ///
    /// Packages go through the same duplicate-name check as graphs built from
    /// manifests.
    pub fn from_yaml(path: &Path) -> ArborResult<Self> {
        let content = fs::read_to_string(path)?;
        let loaded: DependencyGraph = serde_yaml::from_str(&content)?;
        let mut graph = loaded.rebuilt()?;
        graph.finalize()?;

        tracing::debug!(path = %path.display(), graph = %graph.name(), "Loaded graph snapshot");
        Ok(graph)
    }

    /// Load every snapshot in a directory (or a single snapshot file).
    pub fn load_all(path: &Path) -> ArborResult<Vec<Self>> {
        yaml_files(path)?
            .iter()
            .map(|file| Self::from_yaml(file))
            .collect()
    }
}
