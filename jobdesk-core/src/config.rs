//! src/config.rs
//! ============================================================================
//! # Config: user settings loaded from and saved to TOML
//!
//! The file lives in the platform config directory resolved through
//! [`directories::ProjectDirs`] (`~/.config/jobdesk/config.toml` on Linux)
//! and is created with defaults on first start. `JOBDESK_API_URL`
//! overrides the API base URL without touching the file.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use tokio::fs as TokioFs;

use crate::error::AppError;
use crate::model::job_store::DEFAULT_PAGE_SIZE;

/// Environment variable overriding [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "JOBDESK_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the REST API, without the `/jobs` suffix.
    pub base_url: String,

    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Jobs added to the visible list per "show more".
    pub page_size: usize,

    /// Quiet period after a filter edit before the list is refetched.
    #[serde(with = "humantime_serde")]
    pub debounce: Duration,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    #[serde(with = "humantime_serde")]
    pub success_ttl: Duration,

    #[serde(with = "humantime_serde")]
    pub error_ttl: Duration,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            success_ttl: Duration::from_secs(3),
            error_ttl: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the daily rolling log files.
    pub log_dir: PathBuf,

    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            level: "info".to_string(),
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub list: ListConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load the config from the platform config dir, writing defaults when
    /// the file does not exist yet. The environment override is applied last.
    pub async fn load() -> Result<Self, AppError> {
        let path = Self::config_path()?;
        let mut cfg = Self::load_from(&path).await?;
        cfg.apply_env_override(std::env::var(API_URL_ENV).ok());
        Ok(cfg)
    }

    pub async fn load_from(path: &Path) -> Result<Self, AppError> {
        if path.exists() {
            info!("Loading config from {}", path.display());
            let text = TokioFs::read_to_string(path)
                .await
                .map_err(|e| AppError::config_io(path, e))?;
            let cfg: Self = toml::from_str(&text)?;

            Ok(cfg)
        } else {
            info!(
                "No config file found at {}, writing defaults",
                path.display()
            );

            let default_config = Self::default();
            default_config.save_to(path).await?;

            Ok(default_config)
        }
    }

    pub async fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::config_path()?).await
    }

    pub async fn save_to(&self, path: &Path) -> Result<(), AppError> {
        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::config_io(parent, e))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(path, toml_str)
            .await
            .map_err(|e| AppError::config_io(path, e))?;

        Ok(())
    }

    /// A non-empty override replaces the configured base URL.
    pub fn apply_env_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            info!(%url, "API base URL overridden from {API_URL_ENV}");
            self.api.base_url = url;
        }
    }

    pub fn config_path() -> Result<PathBuf, AppError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn config_dir() -> Result<PathBuf, AppError> {
        let proj_dirs =
            ProjectDirs::from("org", "jobdesk", "jobdesk").ok_or(AppError::ConfigDir)?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}
