//! Mock implementations of service traits for testing

use super::traits::{ArtifactRegistry, ConfigProvider, ManifestProvider, NameResolver};
use crate::core::ArborResult;
use crate::manifest::{ManifestEntry, TargetEnvironment};
use crate::registry::PublishedArtifact;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use arbor::di::mocks::MockConfigProvider;
/// use arbor::di::ConfigProvider;
///
/// let mut config = MockConfigProvider::default();
/// config.organization = "acme".to_string();
///
/// assert_eq!(config.organization(), "acme");
/// assert_eq!(config.revision_length(), 7);
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub organization: String,
    pub release_label: String,
    pub revision_length: usize,
    pub build_stamp_format: String,
    pub graph_dir: PathBuf,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            organization: "acme".to_string(),
            release_label: "main".to_string(),
            revision_length: 7,
            build_stamp_format: "%Y%m%d.%H%M%S".to_string(),
            graph_dir: PathBuf::from("/tmp/arbor-test-graphs"),
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn organization(&self) -> &str {
        &self.organization
    }

    fn release_label(&self) -> &str {
        &self.release_label
    }

    fn revision_length(&self) -> usize {
        self.revision_length
    }

    fn build_stamp_format(&self) -> &str {
        &self.build_stamp_format
    }

    fn graph_dir(&self) -> PathBuf {
        self.graph_dir.clone()
    }
}

/// Mock manifest provider serving a fixed list of entries
#[derive(Clone)]
pub struct MockManifestProvider {
    pub target: TargetEnvironment,
    pub entries: Vec<ManifestEntry>,
}

impl MockManifestProvider {
    /// Create a provider for ubuntu/jammy on `channel`
    pub fn new(channel: &str) -> Self {
        Self {
            target: TargetEnvironment {
                environment_name: "ubuntu".to_string(),
                environment_version: "jammy".to_string(),
                channel: channel.to_string(),
            },
            entries: Vec::new(),
        }
    }

    /// Add a manifest entry
    pub fn with_package(mut self, name: &str, revision: &str, depends: &[&str]) -> Self {
        self.entries.push(ManifestEntry {
            name: name.to_string(),
            upstream_version: "1.0.0".to_string(),
            revision: revision.to_string(),
            location: format!("src/{}", name),
            depends: depends.iter().map(|d| d.to_string()).collect(),
            description: None,
            maintainers: None,
        });
        self
    }
}

impl ManifestProvider for MockManifestProvider {
    fn target(&self) -> TargetEnvironment {
        self.target.clone()
    }

    fn manifests(&self) -> ArborResult<Vec<ManifestEntry>> {
        Ok(self.entries.clone())
    }
}

/// Mock name resolver backed by an in-memory rule map
///
/// Records every lookup so tests can assert on resolver traffic.
#[derive(Clone, Default)]
pub struct MockNameResolver {
    rules: HashMap<String, Vec<String>>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl MockNameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule mapping `name` to system packages
    pub fn with_rule(mut self, name: &str, system_names: &[&str]) -> Self {
        self.rules.insert(
            name.to_string(),
            system_names.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Names looked up so far, in call order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().clone()
    }
}

impl NameResolver for MockNameResolver {
    fn resolve(&self, name: &str) -> Option<Vec<String>> {
        self.lookups.lock().push(name.to_string());
        self.rules.get(name).cloned()
    }
}

/// Mock artifact registry holding published artifacts in memory
#[derive(Clone, Default)]
pub struct MockArtifactRegistry {
    artifacts: Arc<Mutex<Vec<PublishedArtifact>>>,
}

impl MockArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an artifact version into the mock registry
    pub fn publish(&self, name: &str, version: &str, channels: &[&str]) {
        self.artifacts.lock().push(PublishedArtifact {
            name: name.to_string(),
            version: version.to_string(),
            channels: channels.iter().map(|c| c.to_string()).collect(),
            depends: Vec::new(),
        });
    }
}

impl ArtifactRegistry for MockArtifactRegistry {
    fn published(&self, artifact_name: &str) -> Vec<PublishedArtifact> {
        self.artifacts
            .lock()
            .iter()
            .filter(|artifact| artifact.name == artifact_name)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_registry_newest() {
        let registry = MockArtifactRegistry::new();
        registry.publish("acme-main-ros1-a", "1.9.0", &["ros1"]);
        registry.publish("acme-main-ros1-a", "1.10.0", &["ros1"]);
        registry.publish("acme-main-ros1-b", "5.0", &["ros1"]);

        let newest = registry.newest("acme-main-ros1-a", "ros1").unwrap();
        assert_eq!(newest.version, "1.10.0");
        assert!(registry.newest("acme-main-ros1-a", "ros2").is_none());
    }

    #[test]
    fn test_mock_resolver_records_lookups() {
        let resolver = MockNameResolver::new().with_rule("boost", &["libboost-dev"]);
        assert_eq!(resolver.resolve("boost"), Some(vec!["libboost-dev".to_string()]));
        assert_eq!(resolver.resolve("other"), None);
        assert_eq!(resolver.lookups(), vec!["boost", "other"]);
    }
}
