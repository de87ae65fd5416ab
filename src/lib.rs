//! Arbor: incremental builds for large sets of interdependent source packages
//!
//! This crate decides what has to be rebuilt, in which order, and which exact
//! artifact versions dependents should pin. Error, path and version primitives
//! are re-exported from `arbor-core`.

pub use arbor_core::{format_error_with_help, ArborError, ArborResult, ErrorHelp};

/// Core module re-exported from arbor-core.
pub mod core {
    pub use arbor_core::core::*;
    pub use arbor_core::{format_error_with_help, ErrorHelp};
}

/// Configuration management.
pub mod config;

/// Packages and artifact naming.
pub mod package;

/// Dependency graph, traversal cache and snapshots.
pub mod graph;

/// Rebuild classification, scheduling and build plans.
pub mod build;

/// Version pins for dependency edges.
pub mod resolver;

/// Published artifact registry.
pub mod registry;

/// Package manifests and system-name rules.
pub mod manifest;

/// Dependency injection infrastructure.
pub mod di;
