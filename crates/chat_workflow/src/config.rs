use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

const CONFIG_FILE_PATH: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the chat service; `/chat` and `/upload` hang off it.
    pub api_base: String,
    pub http_proxy: String,
    pub https_proxy: String,
    /// Per-request timeout. `None` waits for as long as the service takes.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            http_proxy: String::new(),
            https_proxy: String::new(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load `path` (or `config.toml` when present), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILE_PATH).exists() => {
                Self::from_file(Path::new(CONFIG_FILE_PATH))?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str::<Config>(&content)?;
        log::debug!("Loaded config from {}", path.display());
        config.validate("request_timeout_secs")
    }

    /// Override fields from `lookup`, keyed by environment variable name.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_base) = lookup("CHAT_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(http_proxy) = lookup("HTTP_PROXY") {
            self.http_proxy = http_proxy;
        }
        if let Some(https_proxy) = lookup("HTTPS_PROXY") {
            self.https_proxy = https_proxy;
        }
        if let Some(timeout) = lookup("CHAT_REQUEST_TIMEOUT_SECS") {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "CHAT_REQUEST_TIMEOUT_SECS".to_string(),
                    value: timeout.clone(),
                })?;
            self.request_timeout_secs = Some(secs);
            return self.validate("CHAT_REQUEST_TIMEOUT_SECS");
        }
        Ok(self)
    }

    /// Rejects a zero timeout.
    fn validate(self, timeout_key: &str) -> Result<Self, ConfigError> {
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: timeout_key.to_string(),
                value: "0".to_string(),
            });
        }
        Ok(self)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// `None` for an unset or zero timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
