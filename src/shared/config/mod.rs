//! Application configuration module
//!
//! Provides the configuration value injected into the API client at startup,
//! the fixed endpoint paths of the document API, and the pure URL resolver.
//!
//! Nothing in here reads the process environment. Sources (TOML file, env
//! vars) are gathered by the binary and layered with [`AppConfig::overlay`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base host used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "192.168.1.52:3000";

/// User id sent as `created_by` on new documents
pub const DEFAULT_CREATED_BY: i64 = 1;

/// Upper bound on a single HTTP request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable names understood by [`AppConfig::overlay`]
pub mod env_keys {
    pub const API_BASE_URL: &str = "DOCSCAN_API_BASE_URL";
    pub const CAPTURE_DIR: &str = "DOCSCAN_CAPTURE_DIR";
    pub const CREATED_BY: &str = "DOCSCAN_CREATED_BY";
    pub const REQUEST_TIMEOUT_SECS: &str = "DOCSCAN_REQUEST_TIMEOUT_SECS";
}

/// Document API endpoint paths
pub mod endpoints {
    pub const CATEGORIES: &str = "/api/v1/categories";
    pub const DOCUMENTS: &str = "/api/v1/documents";
    pub const DOCUMENTS_SEARCH: &str = "/api/v1/documents/search";
    pub const DOCUMENTS_UPLOAD: &str = "/api/v1/documents/upload";
    /// Static directory the server stores uploaded images under
    pub const UPLOADS: &str = "/uploads";
}

/// Join a base host and an endpoint path into an absolute URL.
///
/// A base without a scheme gets `http://`. A trailing slash on the base is
/// dropped so the join never produces `//`.
///
/// ```rust
/// use docscan::shared::config::build_api_url;
///
/// assert_eq!(
///     build_api_url("192.168.1.52:3000", "/api/v1/categories"),
///     "http://192.168.1.52:3000/api/v1/categories"
/// );
/// assert_eq!(
///     build_api_url("https://docs.example.com", "/api/v1/documents"),
///     "https://docs.example.com/api/v1/documents"
/// );
/// ```
pub fn build_api_url(base: &str, endpoint: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let mut url = if has_scheme(base) {
        base.to_string()
    } else {
        format!("http://{}", base)
    };
    if !endpoint.is_empty() && !endpoint.starts_with('/') {
        url.push('/');
    }
    url.push_str(endpoint);
    url
}

fn has_scheme(base: &str) -> bool {
    let lower = base.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host (optionally with scheme) of the document API
    pub api_base_url: String,
    /// Directory the folder camera watches for new stills
    pub capture_dir: Option<PathBuf>,
    /// Value of `created_by` on documents created by this client
    pub created_by: i64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            capture_dir: None,
            created_by: DEFAULT_CREATED_BY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::MissingValue("api_base_url"));
        }
        if base.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidUrl(self.api_base_url.clone()));
        }
        let host = base
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(base);
        if host.trim_end_matches('/').is_empty() {
            return Err(ConfigError::InvalidUrl(self.api_base_url.clone()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file. A missing file yields the defaults.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(env_keys::API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(dir) = lookup(env_keys::CAPTURE_DIR).filter(|v| !v.trim().is_empty()) {
            self.capture_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = lookup(env_keys::CREATED_BY) {
            self.created_by = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "created_by",
                message: format!("'{}' is not an integer", raw),
            })?;
        }
        if let Some(raw) = lookup(env_keys::REQUEST_TIMEOUT_SECS) {
            self.request_timeout_secs =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    field: "request_timeout_secs",
                    message: format!("'{}' is not a number of seconds", raw),
                })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Absolute URL for an endpoint on the configured host
    pub fn api_url(&self, endpoint: &str) -> String {
        build_api_url(&self.api_base_url, endpoint)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_base_url: Option<String>,
    capture_dir: Option<PathBuf>,
    created_by: Option<i64>,
    request_timeout_secs: Option<u64>,
}

impl AppConfigBuilder {
    /// Set the API base URL
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn capture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.capture_dir = Some(dir.into());
        self
    }

    pub fn created_by(mut self, user_id: i64) -> Self {
        self.created_by = Some(user_id);
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            api_base_url: self.api_base_url.unwrap_or(defaults.api_base_url),
            capture_dir: self.capture_dir.or(defaults.capture_dir),
            created_by: self.created_by.unwrap_or(defaults.created_by),
            request_timeout_secs: self
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
    #[error("failed to read {path:?}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
}
