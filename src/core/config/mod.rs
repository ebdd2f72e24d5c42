//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. Environment variables
//! 4. CLI flags (not handled here)
//!
//! # Config File Locations
//!
//! Searched in order:
//! 1. `$READYROOM_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/readyroom/config.toml`
//! 3. `~/.readyroom/config.toml`
//!
//! # Environment Variables
//!
//! - `READYROOM_NAMESPACE` overrides the namespace
//! - `READYROOM_DEBUG` overrides the debug flag (`1/true/yes/on` or
//!   `0/false/no/off`, case-insensitive)
//!
//! # Example
//!
//! ```no_run
//! use readyroom::core::config::Config;
//!
//! let result = Config::load().unwrap();
//! let config = result.config;
//!
//! println!("namespace: {}", config.namespace);
//! println!("debug: {}", config.debug);
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::Namespace;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Resolved configuration from all sources.
///
/// Defaults, then the config file, then environment variables have been
/// applied by the time `load` returns; CLI flags are layered on by the
/// caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Context namespace.
    pub namespace: Namespace,
    /// Debug failure policy: propagate errors instead of absorbing them.
    pub debug: bool,
    /// Path to the config file that was loaded (if any).
    file_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed, or
    /// if a file or environment value is invalid. Missing config files
    /// are not an error (defaults are used).
    pub fn load() -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (file, file_path) = Self::load_file(&mut warnings)?;
        file.validate()?;

        let namespace = match file.namespace {
            Some(raw) => Namespace::new(raw)
                .map_err(|e| ConfigError::InvalidValue(format!("invalid namespace: {e}")))?,
            None => Namespace::default(),
        };

        let mut config = Config {
            namespace,
            debug: file.debug.unwrap_or(false),
            file_path,
        };
        config.apply_env()?;

        Ok(ConfigLoadResult { config, warnings })
    }

    /// Load the config file from standard locations.
    fn load_file(
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $READYROOM_CONFIG
        if let Ok(path) = std::env::var("READYROOM_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok((config, Some(path)));
            }
            // An explicitly named file that is missing deserves a warning
            // before falling through to the standard locations.
            warnings.push(ConfigWarning {
                message: "READYROOM_CONFIG is set but the file does not exist".to_string(),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/readyroom/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("readyroom/config.toml");
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.readyroom/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".readyroom/config.toml");
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // No config found, use defaults
        Ok((FileConfig::default(), None))
    }

    /// Read and parse a config file.
    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply environment variable overrides.
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(raw) = std::env::var("READYROOM_NAMESPACE") {
            self.namespace = Namespace::new(raw).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid READYROOM_NAMESPACE: {e}"))
            })?;
        }

        if let Ok(raw) = std::env::var("READYROOM_DEBUG") {
            self.debug = parse_debug_flag(&raw)?;
        }

        Ok(())
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

/// Parse a boolean flag value from the environment.
fn parse_debug_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!(
            "invalid READYROOM_DEBUG '{raw}', expected one of: 1, true, yes, on, 0, false, no, off"
        ))),
    }
}
