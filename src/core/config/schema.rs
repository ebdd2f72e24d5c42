//! core::config::schema
//!
//! Configuration file schema.
//!
//! # File Config
//!
//! Located at (in order of precedence):
//! 1. `$READYROOM_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/readyroom/config.toml`
//! 3. `~/.readyroom/config.toml`
//!
//! # Validation
//!
//! Values are validated after parsing to ensure they conform to expected
//! formats (e.g., the namespace must be a plain identifier).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::Namespace;

/// Configuration file contents.
///
/// Every field is optional; unset fields fall back to built-in defaults.
///
/// # Example
///
/// ```toml
/// namespace = "app"
/// debug = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Context namespace (default: "app")
    pub namespace: Option<String>,

    /// Debug failure policy (default: false)
    pub debug: Option<bool>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate the namespace is a plain identifier if specified
        if let Some(namespace) = &self.namespace {
            Namespace::new(namespace)
                .map_err(|e| ConfigError::InvalidValue(format!("invalid namespace: {e}")))?;
        }

        Ok(())
    }
}
