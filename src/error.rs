//! Error types for the iris inference service

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, IrisError>;

/// Failure to bring a model artifact into memory. Always fatal at startup.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("Model artifact not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt model artifact {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("Incompatible model artifact {}: {reason}", path.display())]
    Incompatible { path: PathBuf, reason: String },
}

impl ModelLoadError {
    /// Path of the artifact that failed to load
    pub fn path(&self) -> &PathBuf {
        match self {
            ModelLoadError::NotFound { path }
            | ModelLoadError::Io { path, .. }
            | ModelLoadError::Corrupt { path, .. }
            | ModelLoadError::Incompatible { path, .. } => path,
        }
    }
}

/// Failure raised at the model boundary while serving a prediction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("Invalid shape: model expects {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("Non-finite feature value at column {column}")]
    NonFiniteFeature { column: usize },

    #[error("Model returned no prediction")]
    EmptyOutput,

    #[error("Model emitted class index {index} but only knows {n_classes} classes")]
    UnknownClass { index: usize, n_classes: usize },
}

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum IrisError {
    #[error("Model load error: {0}")]
    ModelLoad(#[from] ModelLoadError),

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),
}
