use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use physinv_caller::RequestSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogDestination;

pub const ENV_BASE_URL: &str = "SAP_API_BASE_URL";
pub const ENV_USER: &str = "SAP_API_USER";
pub const ENV_PASSWORD: &str = "SAP_API_PASSWORD";
pub const ENV_CLIENT: &str = "SAP_API_CLIENT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("base_url is not configured (set it in the config file or SAP_API_BASE_URL)")]
    MissingBaseUrl,
}

/// Connection and logging settings, read from a RON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallerConfig {
    pub base_url: String,
    pub sap_client: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for CallerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            sap_client: Some("100".to_string()),
            user: None,
            password: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            max_bytes: 5 * 1024 * 1024,
            log_destination: LogDestination::Terminal,
            log_file: PathBuf::from("./caller.log"),
            log_level: "Info".to_string(),
        }
    }
}

impl CallerConfig {
    /// Loads the file at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Replaces connection fields with non-empty values returned by `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(base_url) = non_empty(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(user) = non_empty(ENV_USER) {
            self.user = Some(user);
        }
        if let Some(password) = non_empty(ENV_PASSWORD) {
            self.password = Some(password);
        }
        if let Some(client) = non_empty(ENV_CLIENT) {
            self.sap_client = Some(client);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        Ok(())
    }

    pub fn request_settings(&self) -> RequestSettings {
        RequestSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            user: self.user.clone(),
            password: self.password.clone(),
            sap_client: self.sap_client.clone(),
            ..RequestSettings::default()
        }
    }
}
