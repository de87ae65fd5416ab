//! Package manifests and system-name rules
//!
//! A manifest set describes every source package of one target environment:
//! its version, revision, source location and the raw names it depends on. Raw
//! names are split into in-graph and system dependencies by a
//! [`NameResolver`]; the rule table shipped alongside the manifests is the
//! default resolver.

use crate::core::{ArborError, ArborResult};
use crate::di::{ManifestProvider, NameResolver};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// The operating system and channel a manifest set targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEnvironment {
    pub environment_name: String,
    pub environment_version: String,
    pub channel: String,
}

/// One package as declared by its source manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub upstream_version: String,
    pub revision: String,
    pub location: String,
    /// Raw dependency names, not yet split into internal/external
    #[serde(default)]
    pub depends: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<String>,
}

/// Dependency name → system package names.
///
/// An empty list means the name is satisfied without installing anything
/// (typically because it is built from source in the same graph).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable(pub BTreeMap<String, Vec<String>>);

impl NameResolver for RuleTable {
    fn resolve(&self, name: &str) -> Option<Vec<String>> {
        self.0.get(name).cloned()
    }
}

/// Manifest file: target environment, packages and system rules.
///
/// ```yaml
/// environment_name: ubuntu
/// environment_version: jammy
/// channel: ros1
/// packages:
///   - name: roscpp
///     upstream_version: 1.16.0
///     revision: 1a2b3c4d5e6f
///     location: src/ros_comm/roscpp
///     depends: [rosconsole, boost]
/// system_rules:
///   boost: [libboost-all-dev]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSet {
    #[serde(flatten)]
    pub target: TargetEnvironment,
    #[serde(default)]
    pub packages: Vec<ManifestEntry>,
    #[serde(default)]
    pub system_rules: RuleTable,
}

impl ManifestSet {
    /// Load a manifest set from a YAML file
    pub fn load(path: &Path) -> ArborResult<Self> {
        let content = fs::read_to_string(path)?;
        let set: ManifestSet = serde_yaml::from_str(&content).map_err(|e| {
            ArborError::Config(format!("Failed to parse manifests {}: {}", path.display(), e))
        })?;

        set.validate()?;
        tracing::debug!(
            path = %path.display(),
            packages = set.packages.len(),
            "Loaded manifest set"
        );
        Ok(set)
    }

    fn validate(&self) -> ArborResult<()> {
        let mut seen = HashSet::new();
        for entry in &self.packages {
            if entry.name.trim().is_empty() {
                return Err(ArborError::Config(
                    "Manifest entry is missing a name".to_string(),
                ));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ArborError::DuplicateName(entry.name.clone()));
            }
        }
        Ok(())
    }
}

impl ManifestProvider for ManifestSet {
    fn target(&self) -> TargetEnvironment {
        self.target.clone()
    }

    fn manifests(&self) -> ArborResult<Vec<ManifestEntry>> {
        Ok(self.packages.clone())
    }
}
