use crate::utils::error::{Result, RunnerError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Connection defaults, loadable from a TOML file so operators only type
/// what differs per run. A missing file just means built-in defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectionDefaults {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for ConnectionDefaults {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user: "root".to_string(),
            password: String::new(),
            database: "kupathairnew".to_string(),
        }
    }
}

impl ConnectionDefaults {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No defaults file at {}, using built-ins", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| RunnerError::ConfigError {
            message: format!("Invalid defaults file {}: {}", path.display(), e),
        })
    }
}
