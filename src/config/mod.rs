//! Configuration system for pathquill.
//!
//! Settings live in `~/.config/pathquill/config.toml`. Every field has a
//! default, so a partial file (or no file at all) is valid.
//!
//! # Example
//!
//! ```
//! use pathquill::config::{Config, OutputFormat};
//!
//! let config = Config::default();
//! assert_eq!(config.ambiguity_threshold, 3);
//! assert_eq!(config.output_format, OutputFormat::Yaml);
//!
//! let custom = Config {
//!     output_format: OutputFormat::Json,
//!     ..Config::default()
//! };
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::path::DEFAULT_AMBIGUITY_THRESHOLD;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Configuration for the pathquill tool.
///
/// # Fields
///
/// * `ambiguity_threshold` - Matching overload count that triggers a warning (default: 3)
/// * `output_format` - "yaml" or "json" (default: "yaml")
/// * `typed_arguments` - Parse command-line arguments as YAML scalars (default: true)
/// * `null_exit_code` - Exit status when a lookup yields null (default: 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_ambiguity_threshold")]
    pub ambiguity_threshold: usize,

    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// When false, every argument is passed as a string
    #[serde(default = "default_typed_arguments")]
    pub typed_arguments: bool,

    #[serde(default = "default_null_exit_code")]
    pub null_exit_code: u8,
}

fn default_ambiguity_threshold() -> usize {
    DEFAULT_AMBIGUITY_THRESHOLD
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Yaml
}

fn default_typed_arguments() -> bool {
    true
}

fn default_null_exit_code() -> u8 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ambiguity_threshold: default_ambiguity_threshold(),
            output_format: default_output_format(),
            typed_arguments: default_typed_arguments(),
            null_exit_code: default_null_exit_code(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/pathquill/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("pathquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("ignoring invalid config {}: {}", path.display(), err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("output_format = \"json\"").unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.ambiguity_threshold, 3);
        assert!(config.typed_arguments);
        assert_eq!(config.null_exit_code, 1);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(toml::from_str::<Config>("output_format = \"xml\"").is_err());
    }
}
