//! Configuration loader using figment.
//!
//! # Configuration Priority (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. Programmatic configuration ([`ConfigLoader::merge`])
//! 3. Config file (`relay.toml` or `config.toml` in the search paths, or an
//!    explicit file)
//! 4. Environment variables (`RELAY_*`)
//!
//! # Environment Variable Mapping
//!
//! Environment variables use the `RELAY_` prefix with `__` as separator:
//!
//! - `RELAY_NAMESPACE__DIVIDER=--` → `namespace.divider = "--"`
//! - `RELAY_NAMESPACE__PREFIX=feature` → `namespace.prefix = "feature"`
//! - `RELAY_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//!
//! # Example
//!
//! ```rust,ignore
//! use relay_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .file("./relay.toml")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tracing::{debug, info, trace};

use super::error::{ConfigError, ConfigResult};
use super::schema::RelayConfig;

/// File names tried in every search path, in order.
const CONFIG_FILE_NAMES: &[&str] = &["relay.toml", "config.toml"];

/// Prefix of the environment variables read by the loader.
const ENV_PREFIX: &str = "RELAY_";

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    figment: Figment,
    search_paths: Vec<PathBuf>,
    load_env: bool,
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Adds a search path for configuration files.
    ///
    /// Without explicit search paths the current directory and the user
    /// config directory (`<config>/relay`) are searched.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets a specific configuration file to load (overrides search).
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables loading environment variables (default: true).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges configuration programmatically.
    ///
    /// The merged values sit just above the built-in defaults: a config file
    /// or an environment variable setting the same key wins.
    pub fn merge(mut self, config: RelayConfig) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(config));
        self
    }

    /// Loads, validates and returns the configuration.
    pub fn load(self) -> ConfigResult<RelayConfig> {
        let figment = self.build_figment()?;
        let config: RelayConfig = figment.extract()?;
        config.validate()?;

        debug!(
            divider = %config.namespace.divider,
            prefix = config.namespace.active_prefix().unwrap_or(""),
            logging_level = %config.logging.level,
            "Configuration loaded successfully"
        );
        Ok(config)
    }

    fn build_figment(mut self) -> ConfigResult<Figment> {
        // serde defaults fill whatever no source sets
        let mut figment = std::mem::take(&mut self.figment);

        match &self.config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.clone()));
                }
                if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                    return Err(ConfigError::UnsupportedFormat(path.clone()));
                }
                info!(path = %path.display(), "Loading configuration file");
                figment = figment.merge(Toml::file(path));
            }
            None => {
                if let Some(path) = self.find_config_file() {
                    info!(path = %path.display(), "Loading configuration file");
                    figment = figment.merge(Toml::file(path));
                } else {
                    debug!("No configuration file found, using defaults");
                }
            }
        }

        if self.load_env {
            trace!("Loading environment variables with {ENV_PREFIX} prefix");
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        Ok(figment)
    }

    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }
        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd);
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("relay"));
        }
        paths
    }

    /// First existing file of `search paths × file names`.
    fn find_config_file(&self) -> Option<PathBuf> {
        self.resolve_search_paths().into_iter().find_map(|dir| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.exists())
        })
    }
}

/// Loads configuration from the default locations.
pub fn load_config() -> ConfigResult<RelayConfig> {
    ConfigLoader::new().load()
}

/// Loads configuration from a specific file, with environment overrides.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<RelayConfig> {
    ConfigLoader::new().file(path).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use figment::Jail;
    use relay_core::NamespaceOptions;

    #[test]
    fn test_default_config() {
        Jail::expect_with(|_| {
            let config = ConfigLoader::new()
                .search_path(".")
                .without_env()
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(config, RelayConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "relay.toml",
                r#"
                [namespace]
                divider = "--"
                prefix = "feature"

                [logging]
                level = "debug"
                "#,
            )?;
            jail.set_env("RELAY_NAMESPACE__PREFIX", "override");

            let config = ConfigLoader::new()
                .search_path(".")
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(config.namespace.divider, "--");
            assert_eq!(config.namespace.prefix.as_deref(), Some("override"));
            assert_eq!(config.logging.level, LogLevel::Debug);
            Ok(())
        });
    }

    #[test]
    fn test_namespace_alias_in_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[namespace]\nnamespace = \":\"\n")?;
            let config = ConfigLoader::new()
                .search_path(".")
                .without_env()
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(config.namespace.divider, ":");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_divider_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("relay.toml", "[namespace]\ndivider = \"||\"\n")?;
            let result = ConfigLoader::new().search_path(".").without_env().load();
            assert!(matches!(result, Err(ConfigError::Namespace(_))));
            Ok(())
        });
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::new()
            .file("/definitely/not/here/relay.toml")
            .without_env()
            .load();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_programmatic_merge_below_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "relay.toml",
                "[namespace]\nprefix = \"feature\"\n\n[logging]\nlevel = \"debug\"\n",
            )?;
            let config = ConfigLoader::new()
                .search_path(".")
                .merge(RelayConfig {
                    namespace: NamespaceOptions::new().divider("."),
                    ..Default::default()
                })
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(config.namespace.divider, ".");
            assert_eq!(config.namespace.prefix.as_deref(), Some("feature"));
            assert_eq!(config.logging.level, LogLevel::Debug);

            jail.set_env("RELAY_NAMESPACE__DIVIDER", ":");
            let config = ConfigLoader::new()
                .search_path(".")
                .merge(RelayConfig {
                    namespace: NamespaceOptions::new().divider("."),
                    ..Default::default()
                })
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(config.namespace.divider, ":");
            assert_eq!(config.logging.level, LogLevel::Debug);
            Ok(())
        });
    }
}
