use arbor::build::BuildPlan;
use arbor::config::Config;
use arbor::core::ArborResult;
use std::path::PathBuf;

pub fn run(
    config: &Config,
    graph: PathBuf,
    registry: Option<PathBuf>,
    roots: Vec<String>,
    no_propagate: bool,
    output: Option<PathBuf>,
) -> ArborResult<()> {
    let graph = super::load_graph(&graph, registry.as_deref(), config)?;
    let plan = BuildPlan::create(&graph, &roots, !no_propagate)?;

    match output {
        Some(path) => {
            plan.write(&path)?;
            eprintln!(
                "Planned {} package(s) in {} layer(s), reusing {}: {}",
                plan.to_build.len(),
                plan.layers.len(),
                plan.to_reuse.len(),
                path.display()
            );
        }
        None => println!("{}", plan.to_json()?),
    }

    Ok(())
}
