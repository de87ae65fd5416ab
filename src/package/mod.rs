pub mod artifact;
pub mod metadata;

pub use artifact::{normalize_name, ArtifactNaming};
pub use metadata::{Package, PublishedCandidate};
