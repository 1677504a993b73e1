//! Terminal configuration file

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use till_client::ClientConfig;
use till_client::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

pub const CONFIG_FILE: &str = "till.json";
pub const CREDENTIAL_FILE: &str = "credential.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./till-data")
}

/// Settings persisted between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Credential file and logs live here
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            data_dir: default_data_dir(),
        }
    }
}

impl TerminalConfig {
    /// Load from `path`, or defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone()).with_timeout(self.timeout_secs)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = TerminalConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, TerminalConfig::default());
        assert_eq!(config.client_config().timeout, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = TerminalConfig {
            base_url: "http://127.0.0.1:8080".into(),
            timeout_secs: 5,
            data_dir: dir.path().to_path_buf(),
        };
        config.save(&path).unwrap();
        assert_eq!(TerminalConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"timeout_secs": 12}"#).unwrap();
        let config = TerminalConfig::load(&path).unwrap();
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            TerminalConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
