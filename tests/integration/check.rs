//! Tests for `arbor check`

use super::common::{Workspace, MANIFESTS, REGISTRY};
use predicates::prelude::*;

const CONSISTENT_REGISTRY: &str = r#"
artifacts:
  - name: acme-main-ros1-base-lib
    version: 1.0.0-20240101.000000+gitaaaaaaa1234
    channels: [ros1]
  - name: acme-main-ros1-middleware
    version: 2.1.0-20240101.000000+gitbbbbbbb5678
    channels: [ros1]
    depends:
      - name: acme-main-ros1-base-lib
        version: 1.0.0-20240101.000000+gitaaaaaaa1234
"#;

#[test]
fn test_check_reports_stale_pins() {
    let ws = Workspace::new();
    ws.graph(MANIFESTS, None);
    let registry = ws.write("registry.yaml", REGISTRY);

    ws.arbor()
        .arg("check")
        .arg("--graph")
        .arg(ws.path().join("graphs"))
        .arg("--registry")
        .arg(&registry)
        .assert()
        .failure()
        .stdout(predicate::str::contains("acme-main-ros1-app:"))
        .stdout(predicate::str::contains(
            "acme-main-ros1-middleware=2.1.0-20231201.000000+gitbbbbbbb5678",
        ))
        .stdout(predicate::str::contains("built from bbbbbbb5678"))
        .stderr(predicate::str::contains("Registry is inconsistent: 1 artifact(s)"));
}

#[test]
fn test_check_consistent_registry() {
    let ws = Workspace::new();
    ws.graph(MANIFESTS, None);
    let registry = ws.write("registry.yaml", CONSISTENT_REGISTRY);

    ws.arbor()
        .arg("check")
        .arg("--graph")
        .arg(ws.path().join("graphs"))
        .arg("--registry")
        .arg(&registry)
        .assert()
        .success()
        .stdout(predicate::str::contains("ubuntu-jammy-ros1-graph: consistent"));
}

#[test]
fn test_check_uses_configured_graph_dir() {
    let ws = Workspace::new();
    ws.graph(MANIFESTS, None);
    let registry = ws.write("registry.yaml", CONSISTENT_REGISTRY);

    // graph_dir defaults to "graphs", relative to the working directory
    ws.arbor()
        .arg("check")
        .arg("--registry")
        .arg(&registry)
        .assert()
        .success();
}

#[test]
fn test_check_malformed_registry() {
    let ws = Workspace::new();
    ws.graph(MANIFESTS, None);
    let registry = ws.write("registry.yaml", "artifacts:\n  - name: x\n");

    ws.arbor()
        .arg("check")
        .arg("--registry")
        .arg(&registry)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Registry error"));
}
