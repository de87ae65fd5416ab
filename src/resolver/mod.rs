//! Version resolution for dependency pins

pub mod version_resolver;

pub use version_resolver::{resolve, select_candidate, Pin, VersionResolver};
