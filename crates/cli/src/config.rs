//! Configuration management for the CLI
//!
//! Defaults come from `~/.config/mig-bounds/config.toml` (optional) and are
//! overridden by `MIG_BOUNDS_*` environment variables, then by flags.

use anyhow::{Context, Result};
use autoscaler_lib::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "MIG_BOUNDS";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Compute Engine API base URL
    pub api_url: Option<String>,
    /// Project used when `--project` is not given
    pub project: Option<String>,
    /// Overall deadline for the invocation in seconds
    pub timeout_secs: Option<u64>,
    /// Log line format
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Load configuration from the default file and the environment
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from `path` (if it exists) and the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("mig-bounds").join("config.toml"))
    }
}
