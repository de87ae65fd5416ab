use arbor::build::schedule;
use arbor::config::Config;
use arbor::core::{ArborError, ArborResult};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Print the build layers for `names` (every package when empty) as JSON.
pub fn run(config: &Config, graph: PathBuf, names: Vec<String>) -> ArborResult<()> {
    let graph = super::load_graph(&graph, None, config)?;

    let subset: BTreeSet<String> = if names.is_empty() {
        graph.names().into_iter().collect()
    } else {
        for name in &names {
            if !graph.contains(name) {
                return Err(ArborError::UnknownPackage(name.clone()));
            }
        }
        names.into_iter().collect()
    };

    let layers = schedule(&graph, &subset)?;
    println!("{}", serde_json::to_string_pretty(&layers)?);
    Ok(())
}
