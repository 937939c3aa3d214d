use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors surfaced to the caller.
///
/// Sparse tracking data (missing detections, frames out of range, empty
/// rosters) is never an error; only structurally invalid input is.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid frame size: {width}x{height} (both must be positive and finite)")]
    InvalidFrameSize { width: f64, height: f64 },

    #[error("Malformed tracks: {0}")]
    MalformedTracks(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AnalysisError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// True when the caller supplied bad input, as opposed to an environment failure.
    pub fn is_input_error(&self) -> bool {
        match self {
            AnalysisError::InvalidFrameSize { .. } => true,
            AnalysisError::MalformedTracks(_) => true,
            AnalysisError::InvalidConfig(_) => true,
            AnalysisError::SchemaVersion { .. } => true,
            AnalysisError::Io { .. } => false,
            AnalysisError::Serialization(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
