//! Tests for `arbor plan` and `arbor order`

use super::common::{Workspace, MANIFESTS, REGISTRY};
use predicates::prelude::*;
use serde_json::Value;

fn run_json(cmd: &mut assert_cmd::Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_plan_rebuilds_only_changed_package() {
    let ws = Workspace::new();
    let graph = ws.graph(MANIFESTS, Some(REGISTRY));

    let plan = run_json(ws.arbor().arg("plan").arg("--graph").arg(&graph));

    assert_eq!(plan["graph"], "ubuntu-jammy-ros1-graph");
    assert_eq!(plan["build_stamp"], "20240301.120000");
    assert_eq!(plan["to_build"], serde_json::json!(["app"]));
    assert_eq!(plan["to_reuse"], serde_json::json!(["base_lib", "middleware"]));
    assert_eq!(plan["layers"], serde_json::json!([["app"]]));

    let app = &plan["packages"][0];
    assert_eq!(app["artifact_name"], "acme-main-ros1-app");
    assert_eq!(app["artifact_version"], "0.3.0-20240301.120000+gitccccccc");
    assert_eq!(app["pinned_dependencies"][0]["name"], "middleware");
    assert_eq!(
        app["pinned_dependencies"][0]["version"],
        "2.1.0-20240101.000000+gitbbbbbbb5678"
    );
    assert_eq!(
        plan["system_dependencies"],
        serde_json::json!(["libboost-dev", "libssl-dev"])
    );
}

#[test]
fn test_plan_without_candidates_builds_everything_in_layers() {
    let ws = Workspace::new();
    let graph = ws.graph(MANIFESTS, None);

    let plan = run_json(ws.arbor().arg("plan").arg("--graph").arg(&graph).arg("middleware"));

    assert_eq!(plan["to_build"], serde_json::json!(["base_lib", "middleware"]));
    assert_eq!(plan["layers"], serde_json::json!([["base_lib"], ["middleware"]]));
    assert_eq!(
        plan["packages"][1]["pinned_dependencies"][0]["version"],
        "1.0.0-20240301.120000+gitaaaaaaa"
    );
}

#[test]
fn test_plan_with_registry_override() {
    let ws = Workspace::new();
    let graph = ws.graph(MANIFESTS, None);
    let registry = ws.write("registry.yaml", REGISTRY);

    let plan = run_json(
        ws.arbor()
            .arg("plan")
            .arg("--graph")
            .arg(&graph)
            .arg("--registry")
            .arg(&registry),
    );
    assert_eq!(plan["to_build"], serde_json::json!(["app"]));
}

#[test]
fn test_plan_writes_output_file() {
    let ws = Workspace::new();
    let graph = ws.graph(MANIFESTS, Some(REGISTRY));
    let output = ws.path().join("out").join("plan.json");

    ws.arbor()
        .arg("plan")
        .arg("--graph")
        .arg(&graph)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let plan: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(plan["to_build"], serde_json::json!(["app"]));
}

#[test]
fn test_plan_cycle_fails() {
    let ws = Workspace::new();
    let graph = ws.graph(
        r#"
environment_name: ubuntu
environment_version: jammy
channel: ros1
packages:
  - {name: a, upstream_version: "1.0", revision: aaaaaaa, location: src/a, depends: [b]}
  - {name: b, upstream_version: "1.0", revision: bbbbbbb, location: src/b, depends: [a]}
"#,
        None,
    );

    ws.arbor()
        .arg("plan")
        .arg("--graph")
        .arg(&graph)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dependency cycle detected among packages: a, b"));
}

#[test]
fn test_order_all_packages() {
    let ws = Workspace::new();
    let graph = ws.graph(MANIFESTS, None);

    let layers = run_json(ws.arbor().arg("order").arg("--graph").arg(&graph));
    assert_eq!(
        layers,
        serde_json::json!([["base_lib"], ["middleware"], ["app"]])
    );
}

#[test]
fn test_order_subset_ignores_outside_edges() {
    let ws = Workspace::new();
    let graph = ws.graph(MANIFESTS, None);

    let layers = run_json(
        ws.arbor()
            .arg("order")
            .arg("--graph")
            .arg(&graph)
            .arg("app")
            .arg("base_lib"),
    );
    assert_eq!(layers, serde_json::json!([["base_lib", "app"]]));
}

#[test]
fn test_order_unknown_package_fails() {
    let ws = Workspace::new();
    let graph = ws.graph(MANIFESTS, None);

    ws.arbor()
        .arg("order")
        .arg("--graph")
        .arg(&graph)
        .arg("nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown package: nope"));
}
