//! Operator-facing hints for errors surfaced by the CLI.

use crate::core::error::ArborError;

/// Suggestions attached to an error when it is printed.
pub trait ErrorHelp {
    /// A short hint describing how to fix the problem, if one is known.
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for ArborError {
    fn help(&self) -> Option<String> {
        match self {
            ArborError::DuplicateName(name) => Some(format!(
                "Two manifests declare '{}'. Package names must be unique per graph.",
                name
            )),
            ArborError::DanglingDependency { dependency, .. } => Some(format!(
                "Add a manifest for '{}', or add a system rule mapping it to a system package.",
                dependency
            )),
            ArborError::CycleDetected(_) => Some(
                "Break the cycle by removing one of the internal dependencies between these packages."
                    .to_string(),
            ),
            ArborError::UnresolvableDependency(_) => Some(
                "The build plan and registry snapshot disagree. Re-run 'arbor plan' against the same registry snapshot."
                    .to_string(),
            ),
            ArborError::UnknownPackage(_) => Some(
                "Run 'arbor order --graph <snapshot>' to list the packages in the graph."
                    .to_string(),
            ),
            ArborError::InconsistentRegistry(_) => Some(
                "Rebuild the listed artifacts, or remove them from the registry.".to_string(),
            ),
            ArborError::Config(_) => {
                Some("Check the config file (see --config) for typos.".to_string())
            }
            ArborError::Yaml(_) => {
                Some("The snapshot file is not valid YAML for this format.".to_string())
            }
            _ => None,
        }
    }
}

/// Format an error followed by its help hint (if any).
pub fn format_error_with_help(err: &ArborError) -> String {
    match err.help() {
        Some(help) => format!("Error: {}\n\n  help: {}", err, help),
        None => format!("Error: {}", err),
    }
}
