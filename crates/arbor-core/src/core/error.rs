use thiserror::Error;

pub type ArborResult<T> = Result<T, ArborError>;

#[derive(Error, Debug)]
pub enum ArborError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Registry error: {0}")]
    Registry(String),

    /// Two packages with the same name were added to one graph.
    #[error("Package '{0}' already exists in the graph")]
    DuplicateName(String),

    /// An internal dependency names a package that is not in the graph.
    #[error("Package '{dependency}' is an internal dependency of '{package}', but it was not found")]
    DanglingDependency { package: String, dependency: String },

    /// The scheduled subset contains a dependency cycle.
    /// Names are reported in the graph's original order.
    #[error("Dependency cycle detected among packages: {}", .0.join(", "))]
    CycleDetected(Vec<String>),

    /// A reused dependency has no published candidate to pin to.
    #[error("Dependency '{0}' is not being built and has no published candidate")]
    UnresolvableDependency(String),

    /// A package was referenced that the graph does not contain.
    #[error("Unknown package: {0}")]
    UnknownPackage(String),

    /// Published artifacts pin versions that no longer exist in the registry.
    #[error("Registry is inconsistent: {0} artifact(s) pin missing versions")]
    InconsistentRegistry(usize),
}
