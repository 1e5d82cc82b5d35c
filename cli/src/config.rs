//! `cancelflow.toml` loading

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "cancelflow.toml";

/// Overrides `log_filter` when set.
pub const LOG_ENV: &str = "CANCELFLOW_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `tracing_subscriber::EnvFilter` directives
    pub log_filter: String,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Stop a replay at the first rejected action
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            pretty: true,
            strict: false,
        }
    }
}

impl Config {
    /// Load from an explicit path, or from `cancelflow.toml` in the working
    /// directory if present, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
