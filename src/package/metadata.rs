//! Package metadata tracked by a dependency graph

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The newest already-built artifact for a package in the target environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedCandidate {
    /// Version string exactly as published (reused verbatim when pinning).
    pub artifact_version: String,
    /// Source revision embedded in the artifact version, if it carries one.
    #[serde(default)]
    pub revision: Option<String>,
}

impl PublishedCandidate {
    pub fn new(artifact_version: impl Into<String>, revision: Option<String>) -> Self {
        Self {
            artifact_version: artifact_version.into(),
            revision,
        }
    }

    /// Whether this artifact was built from `revision`.
    pub fn built_from(&self, revision: &str) -> bool {
        self.revision.as_deref() == Some(revision)
    }
}

/// One buildable unit in a dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub upstream_version: String,
    /// Short content-addressed source marker (e.g. an abbreviated commit SHA).
    pub revision: String,
    /// Opaque source location, passed through untouched.
    pub location: String,

    /// Requirements outside the graph (system packages).
    #[serde(default)]
    pub external_dependencies: BTreeSet<String>,
    /// Names of other packages in the same graph.
    #[serde(default)]
    pub internal_dependencies: BTreeSet<String>,
    /// Transpose of `internal_dependencies`, filled in by `DependencyGraph::finalize`.
    #[serde(skip)]
    pub reverse_dependencies: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_candidate: Option<PublishedCandidate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<String>,
}

impl Package {
    /// Create a package with no dependencies and no published candidate
    pub fn new(
        name: impl Into<String>,
        upstream_version: impl Into<String>,
        revision: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            upstream_version: upstream_version.into(),
            revision: revision.into(),
            location: location.into(),
            external_dependencies: BTreeSet::new(),
            internal_dependencies: BTreeSet::new(),
            reverse_dependencies: BTreeSet::new(),
            published_candidate: None,
            description: None,
            maintainers: None,
        }
    }

    pub fn with_internal_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.internal_dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_external_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.external_dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_candidate(mut self, candidate: PublishedCandidate) -> Self {
        self.published_candidate = Some(candidate);
        self
    }
}
