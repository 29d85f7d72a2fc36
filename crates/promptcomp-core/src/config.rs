//! Configuration management for promptcomp.
//!
//! Loads configuration from ${PROMPTCOMP_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::format::FormatOptions;

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for promptcomp configuration.
    //!
    //! PROMPTCOMP_HOME resolution order:
    //! 1. PROMPTCOMP_HOME environment variable (if set)
    //! 2. ~/.config/promptcomp (default)
    //! 3. ./.promptcomp when no home directory can be determined

    use std::path::PathBuf;

    pub const HOME_ENV: &str = "PROMPTCOMP_HOME";

    /// Returns the promptcomp home directory.
    pub fn promptcomp_home() -> PathBuf {
        if let Ok(home) = std::env::var(HOME_ENV) {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".promptcomp"),
            |h| h.join(".config").join("promptcomp"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        promptcomp_home().join("config.toml")
    }
}

/// Comparison export configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Right-hand content starting with this marker is embedded unfenced.
    pub preformatted_marker: String,
    /// Where exports are written (current directory when unset).
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            preformatted_marker: ExportConfig::DEFAULT_MARKER.to_string(),
            output_dir: None,
        }
    }
}

impl ExportConfig {
    pub const DEFAULT_MARKER: &str = "# Reference Response";

    pub fn effective_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when PROMPTCOMP_LOG is not set.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Response rendering options
    pub format: FormatOptions,

    /// Comparison export options
    pub export: ExportConfig,

    /// Logging options
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::format::TableDetection;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.format.table_detection, TableDetection::Strict);
        assert!(!config.format.escape_html);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[format]\ntable_detection = \"loose\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.format.table_detection, TableDetection::Loose);
        assert!(!config.format.escape_html);
        assert_eq!(config.export, ExportConfig::default());
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_load_rejects_unknown_detection() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[format]\ntable_detection = \"fuzzy\"\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("table_detection = \"strict\""));
        assert!(contents.contains("# output_dir ="));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_output_dir_defaults_to_cwd() {
        let export = ExportConfig::default();
        assert_eq!(export.effective_output_dir(), PathBuf::from("."));
    }
}
