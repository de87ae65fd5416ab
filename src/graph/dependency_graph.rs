//! Dependency graph for one target environment and channel

use crate::core::{ArborError, ArborResult};
use crate::graph::cache::{Closure, Direction, TraversalCache};
use crate::package::{normalize_name, ArtifactNaming, Package, PublishedCandidate};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Identifies the environment a graph (and its artifacts) targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphIdentity {
    /// Operating system name, e.g. "ubuntu"
    pub environment_name: String,
    /// Operating system version, e.g. "jammy"
    pub environment_version: String,
    /// Logical package set the artifacts are published into
    pub channel: String,
    pub organization: String,
    pub release_label: String,
}

/// Dependency graph over every package of one environment/channel.
///
/// Built once per invocation: packages are added, `finalize` computes reverse
/// edges and validates internal references, after which the graph is only
/// queried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyGraph {
    #[serde(flatten)]
    identity: GraphIdentity,
    /// Token used to mint versions for artifacts built in this run.
    pub build_stamp: String,
    #[serde(default)]
    packages: IndexMap<String, Package>,
    #[serde(skip)]
    cache: TraversalCache,
    #[serde(skip)]
    finalized: bool,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new(identity: GraphIdentity, build_stamp: impl Into<String>) -> Self {
        Self {
            identity,
            build_stamp: build_stamp.into(),
            packages: IndexMap::new(),
            cache: TraversalCache::new(),
            finalized: false,
        }
    }

    pub fn identity(&self) -> &GraphIdentity {
        &self.identity
    }

    pub fn channel(&self) -> &str {
        &self.identity.channel
    }

    /// Snapshot name, e.g. "ubuntu-jammy-ros1-graph"
    pub fn name(&self) -> String {
        format!(
            "{}-{}-{}-graph",
            self.identity.environment_name, self.identity.environment_version, self.identity.channel
        )
    }

    /// Artifact naming scheme for this graph's packages
    pub fn naming(&self) -> ArborResult<ArtifactNaming> {
        ArtifactNaming::new(
            &self.identity.organization,
            &self.identity.release_label,
            &self.identity.channel,
        )
    }

    /// Find the package an artifact name was derived from.
    ///
    /// Returns `None` when the artifact is outside this graph's prefix or no
    /// package normalizes to its suffix.
    pub fn package_for_artifact(&self, artifact_name: &str) -> Option<&Package> {
        let naming = self.naming().ok()?;
        let suffix = naming.package_suffix(artifact_name)?;
        self.packages
            .values()
            .find(|package| normalize_name(&package.name) == suffix)
    }

    /// Add a package to the graph
    pub fn add_package(&mut self, package: Package) -> ArborResult<()> {
        if self.packages.contains_key(&package.name) {
            return Err(ArborError::DuplicateName(package.name));
        }

        self.packages.insert(package.name.clone(), package);
        self.finalized = false;
        self.cache.clear();
        Ok(())
    }

    /// Re-add every package of a deserialized graph through `add_package`.
    ///
    /// Map keys must equal the names of the packages they hold.
    pub(crate) fn rebuilt(self) -> ArborResult<Self> {
        let mut graph = Self::new(self.identity, self.build_stamp);
        for (key, package) in self.packages {
            let name = package.name.clone();
            graph.add_package(package)?;
            if key != name {
                return Err(ArborError::Config(format!(
                    "Graph entry '{}' holds package '{}'",
                    key, name
                )));
            }
        }
        Ok(graph)
    }

    /// Validate internal references and compute reverse dependencies.
    ///
    /// Reverse edges are rebuilt from scratch, so calling this repeatedly yields
    /// the same sets. The graph is left untouched if validation fails.
    pub fn finalize(&mut self) -> ArborResult<()> {
        for (name, package) in &self.packages {
            for dependency in &package.internal_dependencies {
                if !self.packages.contains_key(dependency) {
                    return Err(ArborError::DanglingDependency {
                        package: name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        let edges: Vec<(String, String)> = self
            .packages
            .values()
            .flat_map(|package| {
                package
                    .internal_dependencies
                    .iter()
                    .map(move |dependency| (dependency.clone(), package.name.clone()))
            })
            .collect();

        for package in self.packages.values_mut() {
            package.reverse_dependencies.clear();
        }

        for (dependency, dependent) in edges {
            if let Some(package) = self.packages.get_mut(&dependency) {
                package.reverse_dependencies.insert(dependent);
            }
        }

        self.cache.clear();
        self.finalized = true;
        tracing::debug!(graph = %self.name(), packages = self.packages.len(), "Finalized graph");
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Get a package from the graph
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Package names in the order they were added
    pub fn names(&self) -> Vec<String> {
        self.packages.keys().cloned().collect()
    }

    /// Packages in the order they were added
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Position of a package in insertion order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.packages.get_index_of(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Record (or clear) the published candidate for a package.
    ///
    /// Candidates do not affect edges, so this is allowed after `finalize`.
    pub fn set_candidate(
        &mut self,
        name: &str,
        candidate: Option<PublishedCandidate>,
    ) -> ArborResult<()> {
        let package = self
            .packages
            .get_mut(name)
            .ok_or_else(|| ArborError::UnknownPackage(name.to_string()))?;
        package.published_candidate = candidate;
        Ok(())
    }

    /// All packages `name` depends on, directly or indirectly.
    ///
    /// Unknown names have no dependencies. A package only appears in its own
    /// closure when it sits on a cycle.
    pub fn transitive_dependencies(&self, name: &str) -> Closure {
        self.closure(name, Direction::Dependencies)
    }

    /// All packages that depend on `name`, directly or indirectly.
    pub fn transitive_reverse_dependencies(&self, name: &str) -> Closure {
        self.closure(name, Direction::ReverseDependencies)
    }

    /// Populate the closure cache for every package in parallel.
    pub fn warm_cache(&self) {
        self.packages.keys().collect::<Vec<_>>().par_iter().for_each(|name| {
            self.transitive_dependencies(name);
            self.transitive_reverse_dependencies(name);
        });
    }

    fn closure(&self, name: &str, direction: Direction) -> Closure {
        if let Some(cached) = self.cache.get(direction, name) {
            return cached;
        }

        let closure = self.walk(name, direction);
        self.cache.insert(direction, name, closure)
    }

    /// Iterative depth-first walk with a visited set.
    ///
    /// Closures already in the cache are merged wholesale instead of being
    /// walked again.
    fn walk(&self, start: &str, direction: Direction) -> BTreeSet<String> {
        let mut closure = BTreeSet::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut stack = vec![start.to_string()];
        visited.insert(start.to_string());

        while let Some(current) = stack.pop() {
            let Some(package) = self.packages.get(&current) else {
                continue;
            };

            let edges = match direction {
                Direction::Dependencies => &package.internal_dependencies,
                Direction::ReverseDependencies => &package.reverse_dependencies,
            };

            for next in edges {
                closure.insert(next.clone());
                if !visited.insert(next.clone()) {
                    continue;
                }

                match self.cache.get(direction, next) {
                    Some(cached) => {
                        for reached in cached.iter() {
                            closure.insert(reached.clone());
                            visited.insert(reached.clone());
                        }
                    }
                    None => stack.push(next.clone()),
                }
            }
        }

        closure
    }
}
