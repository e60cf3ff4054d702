//! Iris Serve - inference service for a pre-trained iris classifier
//!
//! The model artifact is loaded once at startup and shared read-only with
//! every request handler.
//!
//! # Modules
//!
//! - [`model`] - `Classifier` capability, artifact loading, decision tree
//! - [`server`] - HTTP server with prediction and metadata endpoints
//! - [`cli`] - Command-line interface
//! - [`error`] - Error taxonomy

pub mod error;
pub mod model;
pub mod server;
pub mod cli;

pub use error::{InferenceError, IrisError, ModelLoadError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{InferenceError, IrisError, ModelLoadError, Result};
    pub use crate::model::{load_model, Classifier, DecisionTreeClassifier, ModelHandle};
    pub use crate::server::{
        create_router, run_server, AppState, PredictionRequest, PredictionResponse, ServerConfig,
    };
}
