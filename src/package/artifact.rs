//! Artifact naming for packages built into a distribution channel

use crate::core::{ArborError, ArborResult};
use regex::Regex;

/// Naming scheme for artifacts: `{organization}-{release_label}-{channel}-{package}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNaming {
    organization: String,
    release_label: String,
    channel: String,
}

impl ArtifactNaming {
    /// Create a naming scheme, validating that every component is a legal name segment
    pub fn new(organization: &str, release_label: &str, channel: &str) -> ArborResult<Self> {
        let re = Regex::new(r"^[A-Za-z0-9._-]+$")
            .map_err(|e| ArborError::Config(format!("Invalid regex: {}", e)))?;

        for (field, value) in [
            ("organization", organization),
            ("release_label", release_label),
            ("channel", channel),
        ] {
            if !re.is_match(value) {
                return Err(ArborError::Config(format!(
                    "Invalid {} '{}': only letters, digits, '.', '_' and '-' are allowed",
                    field, value
                )));
            }
        }

        Ok(Self {
            organization: organization.to_string(),
            release_label: release_label.to_string(),
            channel: channel.to_string(),
        })
    }

    /// Prefix shared by every artifact of this channel.
    pub fn prefix(&self) -> String {
        format!("{}-{}-{}", self.organization, self.release_label, self.channel)
    }

    /// Artifact name for a package. Underscores become dashes.
    pub fn artifact_name(&self, package_name: &str) -> String {
        format!("{}-{}", self.prefix(), normalize_name(package_name))
    }

    /// Strip the channel prefix from an artifact name, returning the normalized package part.
    pub fn package_suffix<'a>(&self, artifact_name: &'a str) -> Option<&'a str> {
        let prefix = self.prefix();
        artifact_name
            .strip_prefix(prefix.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .filter(|rest| !rest.is_empty())
    }

    /// Whether an artifact belongs to this organization/release/channel.
    pub fn owns(&self, artifact_name: &str) -> bool {
        self.package_suffix(artifact_name).is_some()
    }
}

/// Normalize a package name the way artifact names spell it.
pub fn normalize_name(name: &str) -> String {
    name.replace('_', "-")
}
