//! Common utilities for integration tests

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const BUILD_STAMP: &str = "20240301.120000";

pub const MANIFESTS: &str = r#"
environment_name: ubuntu
environment_version: jammy
channel: ros1
packages:
  - name: base_lib
    upstream_version: 1.0.0
    revision: aaaaaaa1234
    location: src/base_lib
    depends: [boost]
  - name: middleware
    upstream_version: 2.1.0
    revision: bbbbbbb5678
    location: src/middleware
    depends: [base_lib, cmake]
  - name: app
    upstream_version: 0.3.0
    revision: ccccccc9012
    location: src/app
    depends: [middleware, libssl]
system_rules:
  boost: [libboost-dev]
  cmake: []
  libssl: [libssl-dev]
"#;

pub const REGISTRY: &str = r#"
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
      - name: libboost-dev
        version: "1.74"
  - name: acme-main-ros1-app
    version: 0.3.0-20240101.000000+gitold0000
    channels: [ros1]
    depends:
      - name: acme-main-ros1-middleware
        version: 2.1.0-20231201.000000+gitbbbbbbb5678
"#;

pub fn arbor_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_arbor"))
}

/// A temporary workspace with a config file pointing at organization "acme".
pub struct Workspace {
    pub temp: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.yaml"),
            "organization: acme\nrelease_label: main\n",
        )
        .unwrap();
        Self { temp }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// `arbor --config <workspace>/config.yaml`, run inside the workspace
    pub fn arbor(&self) -> Command {
        let mut cmd = arbor_command();
        cmd.current_dir(self.path())
            .arg("--config")
            .arg(self.path().join("config.yaml"));
        cmd
    }

    /// Build the graph snapshot for `manifests` and return its path
    pub fn graph(&self, manifests: &str, registry: Option<&str>) -> PathBuf {
        let manifests = self.write("manifests.yaml", manifests);
        let mut cmd = self.arbor();
        cmd.arg("graph")
            .arg("--manifests")
            .arg(&manifests)
            .arg("--output-dir")
            .arg(self.path().join("graphs"))
            .arg("--build-stamp")
            .arg(BUILD_STAMP);
        if let Some(registry) = registry {
            cmd.arg("--registry").arg(self.write("registry.yaml", registry));
        }

        let output = cmd.output().unwrap();
        assert!(
            output.status.success(),
            "graph failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        PathBuf::from(String::from_utf8_lossy(&output.stdout).trim())
    }
}
