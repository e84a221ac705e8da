//! Error types for the session controller.

use std::path::PathBuf;
use tabs_extra_config::ConfigError;
use thiserror::Error;

/// Errors surfaced by controller commands.
///
/// Most recoverable conditions never reach this type: sticky rejections,
/// failed bulk closes, and stale focus targets are absorbed where they occur.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Group or index does not address a tab
    #[error("no tab at group {group}, index {index}")]
    InvalidRequest { group: i64, index: i64 },

    /// Sort criterion name is not in the registry
    #[error("unknown sort criterion '{0}'")]
    UnknownSortCriterion(String),

    /// Command name is not part of the command surface
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Command arguments do not match the command's shape
    #[error("invalid command arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    /// A user-initiated file operation failed
    #[error("{op} failed for '{}': {source}", .path.display())]
    FileOperation {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings could not be loaded or saved
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SessionError {
    pub(crate) fn file_op(
        op: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileOperation {
            op,
            path: path.into(),
            source,
        }
    }
}
