//! Tests for `arbor graph`

use super::common::{Workspace, MANIFESTS, REGISTRY};
use arbor::graph::DependencyGraph;
use predicates::prelude::*;

#[test]
fn test_graph_writes_snapshot() {
    let ws = Workspace::new();
    let path = ws.graph(MANIFESTS, Some(REGISTRY));

    assert!(path.ends_with("graphs/ubuntu-jammy-ros1-graph.yaml"));
    assert!(path.exists());

    let graph = DependencyGraph::from_yaml(&path).unwrap();
    assert_eq!(graph.names(), vec!["base_lib", "middleware", "app"]);
    assert_eq!(graph.build_stamp, "20240301.120000");

    let middleware = graph.get("middleware").unwrap();
    assert_eq!(middleware.revision, "bbbbbbb");
    assert!(middleware.external_dependencies.is_empty());
    assert!(middleware.internal_dependencies.contains("base_lib"));

    let base = graph.get("base_lib").unwrap();
    assert!(base.external_dependencies.contains("libboost-dev"));
    assert!(base.reverse_dependencies.contains("middleware"));
    assert_eq!(
        base.published_candidate.as_ref().unwrap().revision.as_deref(),
        Some("aaaaaaa")
    );
}

#[test]
fn test_graph_without_registry_has_no_candidates() {
    let ws = Workspace::new();
    let graph = DependencyGraph::from_yaml(&ws.graph(MANIFESTS, None)).unwrap();
    assert!(graph.packages().all(|p| p.published_candidate.is_none()));
}

#[test]
fn test_graph_dangling_dependency_fails() {
    let ws = Workspace::new();
    let manifests = ws.write(
        "manifests.yaml",
        r#"
environment_name: ubuntu
environment_version: jammy
channel: ros1
packages:
  - {name: app, upstream_version: "1.0", revision: abcdef0, location: src/app, depends: [ghost]}
"#,
    );

    ws.arbor()
        .arg("graph")
        .arg("--manifests")
        .arg(&manifests)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"))
        .stderr(predicate::str::contains("help:"));
}

#[test]
fn test_graph_duplicate_package_fails() {
    let ws = Workspace::new();
    let manifests = ws.write(
        "manifests.yaml",
        r#"
environment_name: ubuntu
environment_version: jammy
channel: ros1
packages:
  - {name: app, upstream_version: "1.0", revision: a, location: one}
  - {name: app, upstream_version: "1.1", revision: b, location: two}
"#,
    );

    ws.arbor()
        .arg("graph")
        .arg("--manifests")
        .arg(&manifests)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_graph_missing_manifest_file() {
    let ws = Workspace::new();
    ws.arbor()
        .arg("graph")
        .arg("--manifests")
        .arg(ws.path().join("missing.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}
