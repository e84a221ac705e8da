//! Typed error variants for the tabs-extra-config crate.
//!
//! Callers that only need a message can rely on `Display`; callers that want
//! to react to a specific failure (e.g. recreate a corrupt file) can match on
//! the variant.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading, saving, or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing a settings or marker file.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file contained invalid YAML.
    #[error("YAML parse error in settings: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A JSON marker file could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and the reason.
    #[error("Settings validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}
