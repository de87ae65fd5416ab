//! Dependency injection infrastructure for Arbor
//!
//! The planning core only talks to its collaborators (configuration, manifest
//! source, name resolution, artifact registry) through the traits in
//! [`traits`], so each can be swapped for an in-memory mock in tests.
//!
//! # Example (Testing)
//! ```
//! use arbor::di::mocks::*;
//! use arbor::graph::GraphBuilder;
//!
//! let manifests = MockManifestProvider::new("ros1")
//!     .with_package("a", "aaaaaaa", &[])
//!     .with_package("b", "bbbbbbb", &["a"]);
//! let resolver = MockNameResolver::new();
//! let config = MockConfigProvider::default();
//!
//! let graph = GraphBuilder::from_manifests(&manifests, &resolver, None, &config, "1").unwrap();
//! assert_eq!(graph.len(), 2);
//! ```

pub mod mocks;
pub mod traits;

// Re-export key types
pub use traits::{ArtifactRegistry, ConfigProvider, ManifestProvider, NameResolver};
