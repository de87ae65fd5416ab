//! Version pins for dependency edges

use crate::core::version::{ArtifactVersion, StructuredVersion};
use crate::core::{ArborError, ArborResult};
use crate::graph::DependencyGraph;
use crate::package::{ArtifactNaming, Package};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Exact version requirement on one internal dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    /// Package name in the graph
    pub name: String,
    pub artifact_name: String,
    pub version: String,
}

/// Pick the newest version applicable to `target_channel`.
///
/// Versions are compared structurally, so "1.10.0" beats "1.2.0". Returns
/// `None` when no version lists the channel.
pub fn select_candidate<'a, I>(versions: I, target_channel: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a [String])>,
{
    versions
        .into_iter()
        .filter(|(_, channels)| channels.iter().any(|channel| channel == target_channel))
        .map(|(version, _)| version)
        .max_by_key(|version| StructuredVersion::from(*version))
}

/// Version a dependent should pin `dependency_name` to.
///
/// Dependencies being rebuilt get the version minted for this run; reused
/// dependencies keep their published version verbatim.
pub fn resolve<'a, F>(
    dependency_name: &str,
    to_build: &BTreeSet<String>,
    package_by_name: F,
    build_stamp: &str,
) -> ArborResult<String>
where
    F: Fn(&str) -> Option<&'a Package>,
{
    let package = package_by_name(dependency_name)
        .ok_or_else(|| ArborError::UnresolvableDependency(dependency_name.to_string()))?;

    if to_build.contains(dependency_name) {
        let version =
            ArtifactVersion::new(&package.upstream_version, build_stamp, &package.revision);
        return Ok(version.to_string());
    }

    package
        .published_candidate
        .as_ref()
        .map(|candidate| candidate.artifact_version.clone())
        .ok_or_else(|| ArborError::UnresolvableDependency(dependency_name.to_string()))
}

/// Resolves pins against one graph and build set.
pub struct VersionResolver<'g> {
    graph: &'g DependencyGraph,
    to_build: &'g BTreeSet<String>,
    naming: ArtifactNaming,
}

impl<'g> VersionResolver<'g> {
    pub fn new(graph: &'g DependencyGraph, to_build: &'g BTreeSet<String>) -> ArborResult<Self> {
        Ok(Self {
            graph,
            to_build,
            naming: graph.naming()?,
        })
    }

    /// Resolve the version of one dependency
    pub fn resolve(&self, dependency_name: &str) -> ArborResult<String> {
        resolve(
            dependency_name,
            self.to_build,
            |name| self.graph.get(name),
            &self.graph.build_stamp,
        )
    }

    /// Version a package itself will be published as when it is rebuilt
    pub fn minted_version(&self, package: &Package) -> String {
        ArtifactVersion::new(&package.upstream_version, &self.graph.build_stamp, &package.revision)
            .to_string()
    }

    /// Pins for every internal dependency of `package`, sorted by name.
    pub fn pins_for(&self, package: &Package) -> ArborResult<Vec<Pin>> {
        package
            .internal_dependencies
            .iter()
            .map(|dependency| {
                Ok(Pin {
                    name: dependency.clone(),
                    artifact_name: self.naming.artifact_name(dependency),
                    version: self.resolve(dependency)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::dependency_graph::tests::graph_of;
    use crate::package::PublishedCandidate;

    fn channels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_select_candidate_structural_max() {
        let ros1 = channels(&["ros1"]);
        let versions = vec![("1.2.0", ros1.as_slice()), ("1.10.0", ros1.as_slice())];
        assert_eq!(select_candidate(versions, "ros1"), Some("1.10.0"));
    }

    #[test]
    fn test_select_candidate_newest_build_stamp() {
        let ros1 = channels(&["ros1"]);
        let versions = vec![
            ("1.0.0-20240101.000000+gitaaaaaaa", ros1.as_slice()),
            ("1.0.0-20231231.235959+gitfffffff", ros1.as_slice()),
            ("1.0.0-20240101.090000+git0000000", ros1.as_slice()),
        ];
        assert_eq!(
            select_candidate(versions, "ros1"),
            Some("1.0.0-20240101.090000+git0000000")
        );
    }

    #[test]
    fn test_select_candidate_filters_channel() {
        let ros1 = channels(&["ros1"]);
        let both = channels(&["ros1", "ros2"]);
        let versions = vec![
            ("3.0", ros1.as_slice()),
            ("2.0", both.as_slice()),
            ("1.0", both.as_slice()),
        ];
        assert_eq!(select_candidate(versions.clone(), "ros2"), Some("2.0"));
        assert_eq!(select_candidate(versions, "noetic"), None);
        assert_eq!(select_candidate(Vec::new(), "ros1"), None);
    }

    #[test]
    fn test_resolve_built_dependency_mints_version() {
        let graph = graph_of(&[("A", &[]), ("B", &["A"])]);
        let version = resolve("B", &set(&["B"]), |n| graph.get(n), "20240101.000000").unwrap();
        assert_eq!(version, "1.0.0-20240101.000000+gitB0000");
        assert!(version.contains("1.0.0"));
        assert!(version.contains("20240101.000000"));
    }

    #[test]
    fn test_resolve_reused_dependency_keeps_candidate() {
        let mut graph = graph_of(&[("A", &[])]);
        graph
            .set_candidate("A", Some(PublishedCandidate::new("1.0.0-xyz", None)))
            .unwrap();
        let version = resolve("A", &BTreeSet::new(), |n| graph.get(n), "20240101.000000").unwrap();
        assert_eq!(version, "1.0.0-xyz");
    }

    #[test]
    fn test_resolve_unresolvable() {
        let graph = graph_of(&[("A", &[])]);
        assert!(matches!(
            resolve("A", &BTreeSet::new(), |n| graph.get(n), "1"),
            Err(ArborError::UnresolvableDependency(name)) if name == "A"
        ));
        assert!(matches!(
            resolve("ghost", &set(&["ghost"]), |n| graph.get(n), "1"),
            Err(ArborError::UnresolvableDependency(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_pins_for() {
        let mut graph = graph_of(&[("lib_a", &[]), ("lib_b", &[]), ("app", &["lib_b", "lib_a"])]);
        graph
            .set_candidate("lib_b", Some(PublishedCandidate::new("2.0-1", None)))
            .unwrap();
        let to_build = set(&["lib_a", "app"]);
        let resolver = VersionResolver::new(&graph, &to_build).unwrap();

        let pins = resolver.pins_for(graph.get("app").unwrap()).unwrap();
        assert_eq!(
            pins,
            vec![
                Pin {
                    name: "lib_a".to_string(),
                    artifact_name: "acme-main-ros1-lib-a".to_string(),
                    version: "1.0.0-20240101.000000+gitlib_a0000".to_string(),
                },
                Pin {
                    name: "lib_b".to_string(),
                    artifact_name: "acme-main-ros1-lib-b".to_string(),
                    version: "2.0-1".to_string(),
                },
            ]
        );
        assert!(resolver.pins_for(graph.get("lib_a").unwrap()).unwrap().is_empty());
    }
}
