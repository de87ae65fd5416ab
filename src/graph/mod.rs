//! Package dependency graph
//!
//! A [`DependencyGraph`] holds every package of one environment/channel,
//! validates internal references and answers transitive queries from a
//! per-graph cache.

pub mod builder;
pub mod cache;
pub mod dependency_graph;
pub mod queries;
pub mod snapshot;

pub use builder::{mint_build_stamp, GraphBuilder};
pub use cache::{Closure, Direction, TraversalCache};
pub use dependency_graph::{DependencyGraph, GraphIdentity};
