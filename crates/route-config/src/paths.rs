//! Locating and loading configuration documents.
//!
//! Route manager configuration ships on the device partitions. The first
//! matching file wins, searched in this order:
//!
//! - **`ROUTE_CONFIG_PATH`**: an explicit file, if the variable is set
//! - **ODM**: `/odm/etc/route_manager_configuration.xml`
//! - **Vendor**: `/vendor/etc/route_manager_configuration.xml`
//! - **System**: `/system/etc/route_manager_configuration.xml`
//!
//! # Example
//!
//! ```rust,no_run
//! use route_config::paths;
//!
//! if let Some(path) = paths::find_config_file() {
//!     let config = paths::load_or_default(&path);
//!     println!("{} modules", config.modules().len());
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::config::{DeserializeOptions, Deserializer, RouteManagerConfig};
use crate::error::ConfigError;

/// File name of the configuration document.
pub const CONFIG_FILE_NAME: &str = "route_manager_configuration.xml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "ROUTE_CONFIG_PATH";

/// Directories searched for [`CONFIG_FILE_NAME`], highest priority first.
pub fn config_search_dirs() -> Vec<PathBuf> {
    ["/odm/etc", "/vendor/etc", "/system/etc"]
        .into_iter()
        .map(PathBuf::from)
        .collect()
}

/// Finds the configuration file to use.
///
/// Honours [`CONFIG_PATH_ENV`] when it names an existing file, then searches
/// [`config_search_dirs`].
pub fn find_config_file() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from) {
        if path.is_file() {
            return Some(path);
        }
        tracing::warn!(path = %path.display(), "{CONFIG_PATH_ENV} does not name a file");
    }
    find_config_in(&config_search_dirs())
}

/// Returns the first `dir/CONFIG_FILE_NAME` that exists.
pub fn find_config_in(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Reads and decodes a configuration file with default options.
pub fn load(path: impl AsRef<Path>) -> Result<RouteManagerConfig, ConfigError> {
    load_with(path, DeserializeOptions::default())
}

/// Reads and decodes a configuration file.
pub fn load_with(
    path: impl AsRef<Path>,
    options: DeserializeOptions,
) -> Result<RouteManagerConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "loading configuration");
    Deserializer::with_options(options).deserialize(&content)
}

/// Loads a configuration file, substituting an empty configuration on failure.
///
/// The failure and its status code are logged; the caller always gets a
/// usable, possibly empty, configuration.
pub fn load_or_default(path: impl AsRef<Path>) -> RouteManagerConfig {
    let path = path.as_ref();
    match load(path) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(
                path = %path.display(),
                status = %err.status(),
                "falling back to an empty configuration: {err}"
            );
            RouteManagerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"<RouteManagerConfiguration version="1.0"/>"#;

    #[test]
    fn search_dirs_prefer_odm() {
        let dirs = config_search_dirs();
        assert_eq!(dirs.first(), Some(&PathBuf::from("/odm/etc")));
        assert_eq!(dirs.len(), 3);
    }

    #[test]
    fn find_config_in_takes_first_match() {
        let high = TempDir::new().unwrap();
        let low = TempDir::new().unwrap();
        fs::write(low.path().join(CONFIG_FILE_NAME), MINIMAL).unwrap();

        let dirs = vec![high.path().to_path_buf(), low.path().to_path_buf()];
        assert_eq!(find_config_in(&dirs), Some(low.path().join(CONFIG_FILE_NAME)));

        fs::write(high.path().join(CONFIG_FILE_NAME), MINIMAL).unwrap();
        assert_eq!(find_config_in(&dirs), Some(high.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn find_config_in_nothing() {
        let empty = TempDir::new().unwrap();
        assert_eq!(find_config_in(&[empty.path().to_path_buf()]), None);
    }

    #[test]
    fn load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, MINIMAL).unwrap();
        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let err = load("/nonexistent/route_manager_configuration_12345.xml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn load_or_default_swallows_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"<RouteManagerConfiguration version="7.0"/>"#).unwrap();
        let config = load_or_default(&path);
        assert!(config.is_empty());
        assert_eq!(config.version(), None);
    }
}
