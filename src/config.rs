//! Configuration management for pcspecs
//!
//! Config file location:
//! - Linux: ~/.config/pcspecs/config.toml
//! - macOS: ~/Library/Application Support/com.forgemypc.pcspecs/config.toml
//! - Windows: %APPDATA%/forgemypc/pcspecs/config/config.toml
//!
//! You can override the config location by setting `PCSPECS_CONFIG_PATH`.
//! A missing file means defaults; command-line flags override file values.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Whether the report includes hostname and IP address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkPolicy {
    /// Ask on stdin each run
    #[default]
    Ask,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Report file, relative paths resolve against the working directory
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Enumerate GPUs (extended report)
    #[serde(default)]
    pub gpus: bool,

    /// Network identity policy
    #[serde(default)]
    pub network: NetworkPolicy,

    /// Wait for Enter before exiting
    #[serde(default = "default_true")]
    pub pause: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            gpus: false,
            network: NetworkPolicy::default(),
            pause: default_true(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("pcspecs.txt")
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from file or fall back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        tracing::debug!(path = %config_path.display(), "config loaded");
        Ok(config)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(config_path, toml)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("PCSPECS_CONFIG_PATH") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        let proj_dirs = ProjectDirs::from("com", "forgemypc", "pcspecs")
            .context("Could not determine project directories")?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Write the default config file if none exists yet. Returns whether it was created.
    pub fn init_at(config_path: &Path) -> Result<bool> {
        if config_path.exists() {
            return Ok(false);
        }
        Self::default().save_to(config_path)?;
        Ok(true)
    }
}
