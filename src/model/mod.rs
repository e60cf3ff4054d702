//! Model module
//!
//! The service talks to its model only through the [`Classifier`] capability:
//! one feature row in, one label out. Concrete models live in submodules and
//! are brought into memory once, at startup, by [`load_model`].

mod artifact;
mod decision_tree;

pub use artifact::{ModelArtifact, ARTIFACT_FORMAT, ARTIFACT_FORMAT_VERSION};
pub use decision_tree::{DecisionTreeClassifier, TreeNode};

use crate::error::{InferenceError, ModelLoadError};
use ndarray::Array2;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared, read-only handle to the loaded model
pub type ModelHandle = Arc<dyn Classifier>;

/// Trait for classification models that can serve predictions
pub trait Classifier: Send + Sync {
    /// Human readable model family, e.g. "Decision Tree"
    fn model_type(&self) -> &str;

    /// Number of feature columns each row must carry
    fn n_features(&self) -> usize;

    /// Labels the model can emit
    fn classes(&self) -> &[String];

    /// Predict one label per row of `x`
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<String>, InferenceError>;
}

/// Load the model artifact at `path`.
///
/// Every failure is a [`ModelLoadError`]; callers must treat it as fatal.
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelHandle, ModelLoadError> {
    let path = path.as_ref();
    let artifact = ModelArtifact::read(path)?;
    let model = DecisionTreeClassifier::from_artifact(artifact);

    info!(
        path = %path.display(),
        model_type = model.model_type(),
        n_features = model.n_features(),
        n_classes = model.classes().len(),
        depth = model.depth(),
        n_leaves = model.n_leaves(),
        "Model artifact loaded"
    );

    Ok(Arc::new(model))
}

/// Warn when a loaded model disagrees with the fields a request provides.
///
/// A mismatch is not fatal here; it surfaces per request as an
/// [`InferenceError`].
pub fn check_feature_schema(model: &dyn Classifier, expected: &[&str]) {
    if model.n_features() != expected.len() {
        warn!(
            model_features = model.n_features(),
            request_features = expected.len(),
            "Model feature count does not match the request schema; predictions will fail"
        );
    }
}
