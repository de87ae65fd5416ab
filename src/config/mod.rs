use crate::core::path::config_file;
use crate::core::{ArborError, ArborResult};
use crate::di::ConfigProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Organization prefix for artifact names
    #[serde(default = "default_organization")]
    pub organization: String,

    /// Release label for artifact names (e.g. "main", "hotfix")
    #[serde(default = "default_release_label")]
    pub release_label: String,

    /// Number of revision characters recorded in graphs and artifact versions
    #[serde(default = "default_revision_length")]
    pub revision_length: usize,

    /// strftime format of the per-run build stamp (always UTC)
    #[serde(default = "default_build_stamp_format")]
    pub build_stamp_format: String,

    /// Directory for graph snapshots, relative to the working directory
    /// unless absolute
    #[serde(default = "default_graph_dir")]
    pub graph_dir: String,
}

fn default_organization() -> String {
    "arbor".to_string()
}

fn default_release_label() -> String {
    "main".to_string()
}

fn default_revision_length() -> usize {
    crate::core::version::DEFAULT_REVISION_LENGTH
}

fn default_build_stamp_format() -> String {
    "%Y%m%d.%H%M%S".to_string()
}

fn default_graph_dir() -> String {
    "graphs".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            organization: default_organization(),
            release_label: default_release_label(),
            revision_length: default_revision_length(),
            build_stamp_format: default_build_stamp_format(),
            graph_dir: default_graph_dir(),
        }
    }
}

impl Config {
    /// Load config from the platform-specific config directory
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\arbor\config.yaml
    /// - Linux: ~/.config/arbor/config.yaml
    /// - macOS: ~/Library/Application Support/arbor/config.yaml
    ///
    /// A missing file yields the defaults.
    pub fn load() -> ArborResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> ArborResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ArborError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ArborResult<()> {
        if self.revision_length == 0 {
            return Err(ArborError::Config(
                "revision_length must be at least 1".to_string(),
            ));
        }
        if self.build_stamp_format.trim().is_empty() {
            return Err(ArborError::Config(
                "build_stamp_format must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// Implement ConfigProvider trait
impl ConfigProvider for Config {
    fn organization(&self) -> &str {
        &self.organization
    }

    fn release_label(&self) -> &str {
        &self.release_label
    }

    fn revision_length(&self) -> usize {
        self.revision_length
    }

    fn build_stamp_format(&self) -> &str {
        &self.build_stamp_format
    }

    fn graph_dir(&self) -> PathBuf {
        PathBuf::from(&self.graph_dir)
    }
}
