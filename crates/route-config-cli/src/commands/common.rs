//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use route_config::{DeserializeOptions, RouteManagerConfig, paths};
use std::path::{Path, PathBuf};

/// Use the given path, or search the device partitions for one.
pub fn resolve_path(file: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(file) = file {
        return Ok(file);
    }
    let found = paths::find_config_file().with_context(|| {
        format!(
            "no {} found in {} and {} is not set",
            paths::CONFIG_FILE_NAME,
            paths::config_search_dirs()
                .iter()
                .map(|dir| dir.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            paths::CONFIG_PATH_ENV
        )
    })?;
    tracing::info!(path = %found.display(), "using discovered configuration");
    Ok(found)
}

/// Load a document, attaching the path and status code to any failure.
pub fn load(path: &Path, options: DeserializeOptions) -> anyhow::Result<RouteManagerConfig> {
    paths::load_with(path, options).map_err(|e| {
        let status = e.status();
        anyhow::Error::new(e).context(format!("{} rejected with status {status}", path.display()))
    })
}
