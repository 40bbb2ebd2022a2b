use std::path::PathBuf;

use thiserror::Error;

/// Failure to load one of the three artifacts from disk.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Failure while vectorizing or classifying a single word.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictionError {
    #[error("feature dimension mismatch: model expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("feature index {index} out of range for dimension {dim}")]
    FeatureOutOfRange { index: usize, dim: usize },

    #[error("model has no classes")]
    EmptyModel,

    #[error("input produced no features")]
    EmptyInput,

    #[error("no class received a comparable score")]
    NoScore,

    #[error("{0}")]
    Other(String),
}

/// Unanticipated fault inside the lookup pipeline.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{0}")]
    Internal(String),
}

/// Human-readable text from a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
