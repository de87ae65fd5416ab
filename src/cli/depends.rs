use arbor::config::Config;
use arbor::core::ArborResult;
use std::path::PathBuf;

/// System packages to install before building `packages`.
pub fn install(config: &Config, graph: PathBuf, packages: Vec<String>) -> ArborResult<()> {
    let graph = super::load_graph(&graph, None, config)?;
    for name in graph.install_dependencies(&packages)? {
        println!("{}", name);
    }
    Ok(())
}

/// Published artifacts `packages` build against, as `name=version`.
pub fn sources(
    config: &Config,
    graph: PathBuf,
    registry: Option<PathBuf>,
    packages: Vec<String>,
) -> ArborResult<()> {
    let graph = super::load_graph(&graph, registry.as_deref(), config)?;
    for pin in graph.source_pins(&packages)? {
        println!("{}={}", pin.artifact_name, pin.version);
    }
    Ok(())
}
