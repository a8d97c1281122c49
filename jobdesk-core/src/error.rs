//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Job Desk client
//!
//! Local failures: a form that cannot be sent and config files that cannot
//! be read or written. Transport failures stay in [`ApiError`] and travel
//! back to the state as task results.
//!
//! [`ApiError`]: crate::api::client::ApiError

use std::{io, path::PathBuf};
use thiserror::Error;

use crate::model::form::FieldErrors;

/// Unified error type for all client operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// TOML config serialization error.
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// No platform config directory could be determined.
    #[error("Could not determine config directory")]
    ConfigDir,

    /// Config file I/O error with path.
    #[error("Failed to access config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Required form fields were missing; no request was sent.
    #[error("Validation failed: {fields}")]
    Validation { fields: FieldErrors },
}

impl AppError {
    /// Create a validation error from collected field errors
    pub fn validation(fields: FieldErrors) -> Self {
        Self::Validation { fields }
    }

    /// Create a config I/O error for the given path
    pub fn config_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }
}
