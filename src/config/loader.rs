//! Configuration loader with XDG-compliant path resolution
//!
//! Loads configuration from multiple locations with layered priority:
//! 1. `/etc/concurrently/config.toml` (lowest priority)
//! 2. `~/.config/concurrently/config.toml`
//! 3. `~/.concurrently.toml`
//! 4. `./.concurrently.toml`
//! 5. the file named by `CONCURRENTLY_CONFIG`
//! 6. `CONCURRENTLY_*` environment variables (highest priority)
//!
//! Loading happens before the tracing subscriber exists, so the loader
//! records which files it merged in [`LoadedConfig`] and the caller logs
//! them once logging is up.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::Config;

/// Application name used for XDG directories
const APP_NAME: &str = "concurrently";

/// Per-user and per-directory config file name
const DOTFILE: &str = ".concurrently.toml";

/// Environment variable naming an extra config file
pub const CONFIG_ENV: &str = "CONCURRENTLY_CONFIG";

/// Prefix for environment overrides
const ENV_PREFIX: &str = "CONCURRENTLY_";

/// Config file search paths, lowest priority first
pub fn config_paths() -> Vec<PathBuf> {
    let system = Some(Path::new("/etc").join(APP_NAME).join("config.toml"));
    let user = dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"));
    let home = dirs::home_dir().map(|dir| dir.join(DOTFILE));
    let local = Some(PathBuf::from(DOTFILE));

    [system, user, home, local].into_iter().flatten().collect()
}

/// A validated config plus the files it was assembled from
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// Search-path files merged into `config`, lowest priority first
    pub sources: Vec<PathBuf>,
    /// Override file merged on top of `sources`
    pub override_file: Option<PathBuf>,
    /// Override file that was requested but does not exist
    pub missing_override: Option<PathBuf>,
}

impl LoadedConfig {
    /// Emit the loading events; call after logging is initialized
    pub fn log_sources(&self) {
        for path in &self.sources {
            tracing::debug!(path = %path.display(), "loading config");
        }
        if let Some(path) = &self.override_file {
            tracing::debug!(path = %path.display(), "loading override config");
        }
        if let Some(path) = &self.missing_override {
            tracing::warn!(path = %path.display(), "override config not found");
        }
    }
}

/// Layers config files and environment overrides into a [`Config`]
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    search_paths: Vec<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            search_paths: config_paths(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the file search paths (lowest priority first)
    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_paths = paths;
        self
    }

    /// Replace the environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Merge defaults, existing search paths, the override file and the
    /// environment, then validate the result
    ///
    /// A missing override file is not an error; it is reported in
    /// [`LoadedConfig::missing_override`].
    pub fn load(&self, override_path: Option<&Path>) -> Result<LoadedConfig> {
        let sources: Vec<PathBuf> = self
            .search_paths
            .iter()
            .filter(|path| path.exists())
            .cloned()
            .collect();

        let (override_file, missing_override) = match override_path {
            Some(path) if path.exists() => (Some(path.to_path_buf()), None),
            Some(path) => (None, Some(path.to_path_buf())),
            None => (None, None),
        };

        let figment = sources.iter().chain(&override_file).fold(
            Figment::new().merge(Serialized::defaults(Config::default())),
            |figment, path| figment.merge(Toml::file(path)),
        );

        // <PREFIX>POOL__WORKERS=4 maps to pool.workers = 4
        let figment = figment.merge(
            Env::prefixed(&self.env_prefix)
                .ignore(&["config"])
                .split("__"),
        );

        let config: Config = figment.extract().context("Failed to load configuration")?;
        config.validate().context("Invalid configuration")?;

        Ok(LoadedConfig {
            config,
            sources,
            override_file,
            missing_override,
        })
    }
}

/// Load configuration from the standard locations and `CONCURRENTLY_*` env
///
/// # Arguments
/// * `override_path` - Optional path to a config file that takes highest file priority
pub fn load_config(override_path: Option<&Path>) -> Result<LoadedConfig> {
    ConfigLoader::new().load(override_path)
}
