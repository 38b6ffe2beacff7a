//! Error types for camera piloting.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::StableId;

/// Every failure the pilot core can report.
///
/// `InvalidSelection` and `TargetLost` are warnings: the session has already
/// settled into a consistent state by the time they are returned. The rest
/// come from the durable store or configuration.
#[derive(Debug, Error)]
pub enum PilotError {
    /// Start was requested without an object presenting a transform.
    #[error("please select an object with a transform to pilot")]
    InvalidSelection,

    /// The piloted object stopped resolving; piloting has been stopped.
    #[error("piloted object {0} was destroyed, stopping piloting")]
    TargetLost(StableId),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON error in the store document or config file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration values that cannot be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PilotError {
    /// Warnings are surfaced to the user and never need handling by the caller
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PilotError::InvalidSelection | PilotError::TargetLost(_))
    }
}

/// Convenience constructor for [`PilotError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PilotError {
    PilotError::Io {
        path: path.into(),
        source,
    }
}
