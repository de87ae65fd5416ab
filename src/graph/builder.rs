//! Graph construction from package manifests

use crate::core::{ArborError, ArborResult};
use crate::di::{ArtifactRegistry, ConfigProvider, ManifestProvider, NameResolver};
use crate::graph::{DependencyGraph, GraphIdentity};
use crate::manifest::ManifestEntry;
use crate::package::Package;
use crate::registry::attach_candidates;
use chrono::format::{Item, StrftimeItems};
use chrono::Utc;
use std::collections::{BTreeSet, HashSet};

/// Mint the build stamp for this run from a strftime format (UTC).
pub fn mint_build_stamp(format: &str) -> ArborResult<String> {
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.is_empty() || items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ArborError::Config(format!(
            "Invalid build stamp format: '{}'",
            format
        )));
    }

    Ok(Utc::now().format_with_items(items.into_iter()).to_string())
}

/// Splits raw manifest dependencies into internal and external sets.
pub struct GraphBuilder<'a> {
    resolver: &'a dyn NameResolver,
    source_packages: HashSet<String>,
    warned: HashSet<String>,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder that knows which names are built from source
    pub fn new<I, S>(resolver: &'a dyn NameResolver, source_packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resolver,
            source_packages: source_packages.into_iter().map(Into::into).collect(),
            warned: HashSet::new(),
        }
    }

    /// Build, finalize and (optionally) attach published candidates.
    pub fn from_manifests(
        provider: &dyn ManifestProvider,
        resolver: &dyn NameResolver,
        registry: Option<&dyn ArtifactRegistry>,
        config: &dyn ConfigProvider,
        build_stamp: &str,
    ) -> ArborResult<DependencyGraph> {
        let target = provider.target();
        let entries = provider.manifests()?;

        let identity = GraphIdentity {
            environment_name: target.environment_name,
            environment_version: target.environment_version,
            channel: target.channel,
            organization: config.organization().to_string(),
            release_label: config.release_label().to_string(),
        };
        let mut graph = DependencyGraph::new(identity, build_stamp);
        // Validate naming before doing any work
        graph.naming()?;

        let mut builder = GraphBuilder::new(resolver, entries.iter().map(|e| e.name.clone()));
        for entry in &entries {
            let package = builder.package(entry, config.revision_length());
            graph.add_package(package)?;
        }
        graph.finalize()?;

        if let Some(registry) = registry {
            attach_candidates(&mut graph, registry, config.revision_length())?;
        }

        tracing::info!(graph = %graph.name(), packages = graph.len(), "Built dependency graph");
        Ok(graph)
    }

    /// Turn one manifest entry into a graph package.
    pub fn package(&mut self, entry: &ManifestEntry, revision_length: usize) -> Package {
        let (external, internal) = self.classify(&entry.name, &entry.depends);
        let revision: String = entry.revision.chars().take(revision_length).collect();

        let mut package = Package::new(
            entry.name.clone(),
            entry.upstream_version.clone(),
            revision,
            entry.location.clone(),
        )
        .with_internal_dependencies(internal)
        .with_external_dependencies(external);
        package.description = entry.description.clone();
        package.maintainers = entry.maintainers.clone();
        package
    }

    /// Classify the raw dependency names of `package`.
    ///
    /// Returns `(external, internal)`.
    pub fn classify(
        &mut self,
        package: &str,
        depends: &[String],
    ) -> (BTreeSet<String>, BTreeSet<String>) {
        let mut external = BTreeSet::new();
        let mut internal = BTreeSet::new();

        for name in depends {
            let is_source = self.source_packages.contains(name);
            match self.resolver.resolve(name) {
                Some(system_names) if system_names.is_empty() => {
                    if is_source {
                        self.warn_once(
                            name,
                            format!(
                                "{} resolves to no system package, building it from source",
                                name
                            ),
                        );
                        internal.insert(name.clone());
                    }
                }
                Some(system_names) => {
                    if is_source {
                        self.warn_once(
                            name,
                            format!(
                                "{} is built from source but a system rule exists; using the system package",
                                name
                            ),
                        );
                    }
                    external.extend(system_names);
                }
                None => {
                    tracing::debug!(
                        package,
                        dependency = %name,
                        "No system rule, treating as internal"
                    );
                    internal.insert(name.clone());
                }
            }
        }

        (external, internal)
    }

    fn warn_once(&mut self, key: &str, message: String) {
        if self.warned.insert(key.to_string()) {
            tracing::warn!("{}", message);
        }
    }
}
