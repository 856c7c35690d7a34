//! Configuration module for concurrently
//!
//! Provides XDG-compliant layered configuration loading with
//! environment variable overrides.

pub mod loader;
pub mod model;

pub use loader::{config_paths, load_config, ConfigLoader, LoadedConfig, CONFIG_ENV};
pub use model::*;
