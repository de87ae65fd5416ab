//! Build planning: what to rebuild, in which order, pinned to which versions

pub mod classifier;
pub mod plan;
pub mod scheduler;

pub use classifier::{needs_rebuild, Classification, RebuildClassifier};
pub use plan::{BuildPlan, PlannedArtifact};
pub use scheduler::{order, schedule};
