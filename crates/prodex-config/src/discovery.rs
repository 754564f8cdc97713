//! File-based config discovery and layered loading.
//!
//! Tiers, lowest precedence first: built-in defaults, `prodex.json`,
//! `PRODEX_*` environment variables, run-time overrides.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};

use crate::config::{ConfigOverrides, ProdexConfig};
use crate::error::{ConfigError, Result};

/// Name of the project config file looked up in the root.
pub const CONFIG_FILE_NAME: &str = "prodex.json";

/// Prefix of environment variables that override config values.
/// Nested keys are separated by `__`, e.g. `PRODEX_RESOLVE__DEPTH=3`.
pub const ENV_PREFIX: &str = "PRODEX_";

/// Configuration discovery rooted at a project directory.
///
/// # Example
///
/// ```no_run
/// use prodex_config::{ConfigDiscovery, ConfigOverrides};
///
/// let config = ConfigDiscovery::new(".")
///     .with_overrides(ConfigOverrides {
///         depth: Some(4),
///         ..Default::default()
///     })
///     .load()
///     .unwrap();
/// assert_eq!(config.resolve.depth, 4);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
    config_file: Option<PathBuf>,
    overrides: ConfigOverrides,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config_file: None,
            overrides: ConfigOverrides::default(),
        }
    }

    /// Use an explicit config file instead of `<root>/prodex.json`.
    /// A missing explicit file is an error; a missing default file is not.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Find the config file for this root, if any.
    pub fn find(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_file {
            return Some(self.root.join(path));
        }
        let path = self.root.join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }

    /// Assemble the provider stack without extracting it.
    pub fn figment(&self) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(ProdexConfig::default()));

        if let Some(path) = self.find() {
            if !path.is_file() {
                return Err(ConfigError::NotFound);
            }
            tracing::debug!("loading config from {}", path.display());
            figment = figment.merge(Json::file(path));
        } else {
            tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if !self.overrides.is_empty() {
            figment = figment.merge(Serialized::defaults(self.overrides.to_value()));
        }

        Ok(figment)
    }

    /// Load the merged, immutable configuration for one run.
    pub fn load(&self) -> Result<ProdexConfig> {
        let mut config: ProdexConfig = self.figment()?.extract().map_err(|e| {
            let field = if e.path.is_empty() {
                "config".to_string()
            } else {
                e.path.join(".")
            };
            ConfigError::InvalidValue {
                field,
                hint: Some(e.to_string()),
            }
        })?;

        config.root = std::path::absolute(&self.root)?;
        Ok(config)
    }
}

/// Discover and load config from the current directory.
pub fn discover() -> Result<ProdexConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(root).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert!(discovery.find().is_none());
    }

    #[test]
    fn find_discovers_json_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, r#"{ "resolve": { "depth": 4 } }"#).unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert_eq!(discovery.find().unwrap(), config_path);
    }

    #[test]
    fn load_without_file_uses_defaults_and_absolute_root() {
        let dir = TempDir::new().unwrap();
        let config = ConfigDiscovery::new(dir.path()).load().unwrap();

        assert_eq!(config.resolve, crate::ResolveOptions::default());
        assert!(config.root.is_absolute());
        assert_eq!(config.root, dir.path());
    }

    #[test]
    fn missing_explicit_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path())
            .with_file("custom.json")
            .load();
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn malformed_json_is_invalid_value() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

        let result = ConfigDiscovery::new(dir.path()).load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn wrong_type_reports_field_path() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "resolve": { "depth": "deep" } }"#,
        )
        .unwrap();

        match ConfigDiscovery::new(dir.path()).load() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "resolve.depth"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }
}
