use std::path::PathBuf;

use crate::shared::config::{AppConfig, ConfigError};

/// Config file name under the platform config directory
const CONFIG_FILE: &str = "config.toml";

/// Folder under the pictures directory used when no capture dir is set
const DEFAULT_CAPTURE_FOLDER: &str = "docscan";

/// Startup configuration of the desktop app.
///
/// Resolved once in `main` and handed to the screens; nothing below reads
/// the environment again.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    pub fn new(app: AppConfig) -> Self {
        Self { app }
    }

    /// Layer the config file and the process environment over the defaults
    pub fn load() -> Result<Self, ConfigError> {
        let base = match Self::config_file_path() {
            Some(path) => AppConfig::load_file(&path)?,
            None => AppConfig::default(),
        };
        let app = base.overlay(|key| std::env::var(key).ok())?;
        Ok(Self { app })
    }

    /// `<config_dir>/docscan/config.toml`
    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docscan").join(CONFIG_FILE))
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        self.app.api_url(path)
    }

    pub fn created_by(&self) -> i64 {
        self.app.created_by
    }

    /// Folder the camera reads stills from
    pub fn capture_dir(&self) -> PathBuf {
        self.app.capture_dir.clone().unwrap_or_else(|| {
            dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DEFAULT_CAPTURE_FOLDER)
        })
    }
}
