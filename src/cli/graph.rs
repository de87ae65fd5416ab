use arbor::config::Config;
use arbor::core::ArborResult;
use arbor::di::{ArtifactRegistry, ConfigProvider};
use arbor::graph::{mint_build_stamp, GraphBuilder};
use arbor::manifest::ManifestSet;
use arbor::registry::RegistrySnapshot;
use std::path::PathBuf;

pub fn run(
    config: &Config,
    manifests: PathBuf,
    registry: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    build_stamp: Option<String>,
) -> ArborResult<()> {
    let manifest_set = ManifestSet::load(&manifests)?;
    let registry = registry
        .as_deref()
        .map(RegistrySnapshot::load)
        .transpose()?;

    let build_stamp = match build_stamp {
        Some(stamp) => stamp,
        None => mint_build_stamp(config.build_stamp_format())?,
    };

    let graph = GraphBuilder::from_manifests(
        &manifest_set,
        &manifest_set.system_rules,
        registry.as_ref().map(|r| r as &dyn ArtifactRegistry),
        config,
        &build_stamp,
    )?;

    let output_dir = output_dir.unwrap_or_else(|| config.graph_dir());
    let path = graph.write_yaml(&output_dir)?;

    println!("{}", path.display());
    Ok(())
}
