use crate::core::error::{ArborError, ArborResult};
use std::path::{Path, PathBuf};

/// Get the Arbor home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\arbor
/// - Linux: ~/.config/arbor
/// - macOS: ~/Library/Application Support/arbor
pub fn arbor_home() -> ArborResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ArborError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("arbor"))
}

/// Get the config file path (`<arbor_home>/config.yaml`)
pub fn config_file() -> ArborResult<PathBuf> {
    Ok(arbor_home()?.join("config.yaml"))
}

/// Path of a graph snapshot inside a graph directory.
pub fn graph_file(graph_dir: &Path, graph_name: &str) -> PathBuf {
    graph_dir.join(format!("{}.yaml", graph_name))
}

/// Collect every `*.yaml` / `*.yml` file under `path`, or `path` itself if it is a file.
///
/// Results are sorted so that multi-graph runs are reproducible.
pub fn yaml_files(path: &Path) -> ArborResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(ArborError::Path(format!(
            "{} is neither a file nor a directory",
            path.display()
        )));
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(path).max_depth(1) {
        let entry = entry?;
        let is_yaml = entry
            .path()
            .extension()
            .map(|ext| ext == "yaml" || ext == "yml")
            .unwrap_or(false);
        if entry.file_type().is_file() && is_yaml {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> ArborResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
