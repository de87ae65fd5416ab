use arbor::config::Config;
use arbor::core::{ArborError, ArborResult};
use arbor::di::ConfigProvider;
use arbor::graph::DependencyGraph;
use arbor::registry::{attach_candidates, check_consistency, RegistrySnapshot};
use std::path::PathBuf;

/// Check every graph under `graph` against a registry snapshot.
pub fn run(config: &Config, graph: Option<PathBuf>, registry: PathBuf) -> ArborResult<()> {
    let path = super::graph_path(graph, config);
    let registry = RegistrySnapshot::load(&registry)?;
    let mut broken = 0;

    for mut graph in DependencyGraph::load_all(&path)? {
        attach_candidates(&mut graph, &registry, config.revision_length())?;
        let report = check_consistency(&graph, &registry)?;

        if report.is_consistent() {
            println!("{}: consistent", graph.name());
            continue;
        }

        println!("{}:", graph.name());
        for (artifact, conflicts) in &report.conflicts {
            println!("  {}:", artifact);
            for conflict in conflicts {
                let built_from = conflict
                    .pinned_revision
                    .as_ref()
                    .map(|revision| format!(", built from {}", revision))
                    .unwrap_or_default();
                match &conflict.available {
                    Some(available) => println!(
                        "    {}={} (available: {}{})",
                        conflict.dependency, conflict.pinned, available, built_from
                    ),
                    None => println!(
                        "    {}={} (not published{})",
                        conflict.dependency, conflict.pinned, built_from
                    ),
                }
            }
        }
        broken += report.broken_artifacts();
    }

    if broken > 0 {
        return Err(ArborError::InconsistentRegistry(broken));
    }
    Ok(())
}
