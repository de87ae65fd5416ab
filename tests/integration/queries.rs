//! Tests for `arbor install` and `arbor sources`

use super::common::{Workspace, MANIFESTS, REGISTRY};
use predicates::prelude::*;

#[test]
fn test_install_lists_direct_system_dependencies() {
    let ws = Workspace::new();
    let graph = ws.graph(MANIFESTS, None);

    ws.arbor()
        .arg("install")
        .arg("--graph")
        .arg(&graph)
        .arg("middleware")
        .assert()
        .success()
        .stdout("libboost-dev\n");

    ws.arbor()
        .arg("install")
        .arg("--graph")
        .arg(&graph)
        .arg("app")
        .assert()
        .success()
        .stdout("libssl-dev\n");
}

#[test]
fn test_install_requires_packages() {
    let ws = Workspace::new();
    let graph = ws.graph(MANIFESTS, None);

    ws.arbor()
        .arg("install")
        .arg("--graph")
        .arg(&graph)
        .assert()
        .failure();
}

#[test]
fn test_sources_pins_published_dependencies() {
    let ws = Workspace::new();
    let graph = ws.graph(MANIFESTS, Some(REGISTRY));

    ws.arbor()
        .arg("sources")
        .arg("--graph")
        .arg(&graph)
        .arg("app")
        .assert()
        .success()
        .stdout("acme-main-ros1-middleware=2.1.0-20240101.000000+gitbbbbbbb5678\n");
}

#[test]
fn test_sources_without_candidate_fails() {
    let ws = Workspace::new();
    let graph = ws.graph(MANIFESTS, None);

    ws.arbor()
        .arg("sources")
        .arg("--graph")
        .arg(&graph)
        .arg("app")
        .assert()
        .failure()
        .stderr(predicate::str::contains("middleware"));
}
