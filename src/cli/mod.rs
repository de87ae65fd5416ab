pub mod check;
pub mod depends;
pub mod graph;
pub mod order;
pub mod plan;

use arbor::config::Config;
use arbor::core::ArborResult;
use arbor::di::ConfigProvider;
use arbor::graph::DependencyGraph;
use arbor::registry::{attach_candidates, RegistrySnapshot};
use std::path::{Path, PathBuf};

/// Load the config from `--config`, or from the platform config directory.
pub fn load_config(path: Option<&Path>) -> ArborResult<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Load a graph snapshot, refreshing its candidates from a registry snapshot
/// when one is given.
pub fn load_graph(
    path: &Path,
    registry: Option<&Path>,
    config: &dyn ConfigProvider,
) -> ArborResult<DependencyGraph> {
    let mut graph = DependencyGraph::from_yaml(path)?;
    if let Some(registry) = registry {
        let registry = RegistrySnapshot::load(registry)?;
        attach_candidates(&mut graph, &registry, config.revision_length())?;
    }
    Ok(graph)
}

/// `--graph` if given, otherwise the configured graph directory.
pub fn graph_path(path: Option<PathBuf>, config: &dyn ConfigProvider) -> PathBuf {
    path.unwrap_or_else(|| config.graph_dir())
}
