//! Configuration schema definitions.
//!
//! This module defines the project configuration structure.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default configuration file name, looked up in the project root.
pub const PROJECT_CONFIG_FILENAME: &str = "deploy.toml";

/// Root configuration for a contract project.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Logging settings.
    pub logging: LoggingConfig,

    /// Deployment targets keyed by network name.
    pub networks: BTreeMap<String, NetworkEntry>,
}

/// One `[networks.<name>]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkEntry {
    /// JSON-RPC endpoint URL (http, ws or ipc).
    pub url: String,

    /// Directory holding the encrypted key files for this network.
    ///
    /// Relative paths are resolved against the directory containing the
    /// configuration file.
    pub keystore: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
