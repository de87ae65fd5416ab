//! Trait definitions for dependency injection

use crate::core::ArborResult;
use crate::manifest::{ManifestEntry, TargetEnvironment};
use crate::registry::PublishedArtifact;
use crate::resolver::select_candidate;
use std::path::PathBuf;

/// Trait for configuration access
///
/// Provides read-only access to application configuration.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Organization prefix used in artifact names
    fn organization(&self) -> &str;

    /// Release label used in artifact names
    fn release_label(&self) -> &str;

    /// Number of revision characters embedded in artifact versions
    fn revision_length(&self) -> usize;

    /// strftime format of the per-run build stamp
    fn build_stamp_format(&self) -> &str;

    /// Directory graph snapshots are written to and read from
    fn graph_dir(&self) -> PathBuf;
}

/// Source of package manifests for one target environment
pub trait ManifestProvider: Send + Sync {
    /// Environment and channel the manifests describe
    fn target(&self) -> TargetEnvironment;

    /// Every package manifest, in declaration order
    fn manifests(&self) -> ArborResult<Vec<ManifestEntry>>;
}

/// Maps abstract dependency names to system package names
pub trait NameResolver: Send + Sync {
    /// `None` when no rule exists for `name`; `Some(vec![])` when the rule
    /// resolves to nothing.
    fn resolve(&self, name: &str) -> Option<Vec<String>>;
}

/// Read access to already-published artifacts
pub trait ArtifactRegistry: Send + Sync {
    /// All published versions of an artifact, in any order
    fn published(&self, artifact_name: &str) -> Vec<PublishedArtifact>;

    /// The newest published version applicable to `channel`
    fn newest(&self, artifact_name: &str, channel: &str) -> Option<PublishedArtifact> {
        let published = self.published(artifact_name);
        let version = select_candidate(
            published
                .iter()
                .map(|artifact| (artifact.version.as_str(), artifact.channels.as_slice())),
            channel,
        )?
        .to_string();

        published
            .into_iter()
            .find(|artifact| artifact.version == version)
    }
}
