//! On-disk model artifact
//!
//! Artifacts are JSON documents written by the training pipeline. The
//! envelope carries a format tag and version so that artifacts from an
//! incompatible serializer are rejected before their payload is trusted.

use crate::error::ModelLoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::decision_tree::TreeNode;

/// Format tag every supported artifact must carry
pub const ARTIFACT_FORMAT: &str = "iris-serve/decision-tree";

/// Only artifact layout version this build understands
pub const ARTIFACT_FORMAT_VERSION: u64 = 1;

/// Serialized classifier as produced by the training pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format: String,
    pub format_version: u64,
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    pub tree: TreeNode,
}

impl ModelArtifact {
    /// Read and check an artifact from disk
    pub fn read(path: &Path) -> Result<Self, ModelLoadError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ModelLoadError::NotFound { path: path.to_path_buf() },
            _ => ModelLoadError::Io { path: path.to_path_buf(), source: e },
        })?;
        Self::from_slice(&bytes, path)
    }

    /// Parse and check an artifact; `path` is only used for error reporting
    pub fn from_slice(bytes: &[u8], path: &Path) -> Result<Self, ModelLoadError> {
        let corrupt = |reason: String| ModelLoadError::Corrupt {
            path: path.to_path_buf(),
            reason,
        };
        let incompatible = |reason: String| ModelLoadError::Incompatible {
            path: path.to_path_buf(),
            reason,
        };

        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| corrupt(format!("not valid JSON: {}", e)))?;

        // Envelope first: a foreign serializer must read as incompatible, not corrupt
        let format = value.get("format").and_then(|v| v.as_str());
        if format != Some(ARTIFACT_FORMAT) {
            return Err(incompatible(format!(
                "expected format {:?}, found {:?}",
                ARTIFACT_FORMAT,
                format.unwrap_or("<missing>")
            )));
        }
        let version = value.get("format_version").and_then(|v| v.as_u64());
        if version != Some(ARTIFACT_FORMAT_VERSION) {
            return Err(incompatible(match version {
                Some(v) => format!(
                    "format version {} is not supported (expected {})",
                    v, ARTIFACT_FORMAT_VERSION
                ),
                None => "missing format_version".to_string(),
            }));
        }

        let artifact: ModelArtifact = serde_json::from_value(value)
            .map_err(|e| corrupt(format!("unexpected artifact layout: {}", e)))?;
        artifact.validate().map_err(corrupt)?;
        Ok(artifact)
    }

    /// Structural checks on the decoded payload
    fn validate(&self) -> Result<(), String> {
        if self.feature_names.is_empty() {
            return Err("artifact declares no features".to_string());
        }
        if self.classes.is_empty() {
            return Err("artifact declares no classes".to_string());
        }
        self.tree
            .check(self.feature_names.len(), self.classes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelLoadError;
    use serde_json::json;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("test.json")
    }

    fn artifact_json() -> serde_json::Value {
        json!({
            "format": ARTIFACT_FORMAT,
            "format_version": 1,
            "model_type": "Decision Tree",
            "feature_names": ["a", "b"],
            "classes": ["x", "y"],
            "tree": {
                "Split": {
                    "feature_idx": 1,
                    "threshold": 0.5,
                    "left": { "Leaf": { "class_idx": 0 } },
                    "right": { "Leaf": { "class_idx": 1, "n_samples": 7 } }
                }
            }
        })
    }

    fn parse(value: &serde_json::Value) -> Result<ModelArtifact, ModelLoadError> {
        ModelArtifact::from_slice(value.to_string().as_bytes(), &path())
    }

    #[test]
    fn test_valid_artifact() {
        let artifact = parse(&artifact_json()).unwrap();
        assert_eq!(artifact.feature_names, vec!["a", "b"]);
        assert_eq!(artifact.classes.len(), 2);
    }

    #[test]
    fn test_wrong_format_is_incompatible() {
        let mut value = artifact_json();
        value["format"] = json!("sklearn/joblib");
        assert!(matches!(parse(&value), Err(ModelLoadError::Incompatible { .. })));
    }

    #[test]
    fn test_future_version_is_incompatible() {
        let mut value = artifact_json();
        value["format_version"] = json!(2);
        let err = parse(&value).unwrap_err();
        assert!(matches!(err, ModelLoadError::Incompatible { .. }));
        assert!(err.to_string().contains("format version 2"));
    }

    #[test]
    fn test_missing_tree_is_corrupt() {
        let mut value = artifact_json();
        value.as_object_mut().unwrap().remove("tree");
        assert!(matches!(parse(&value), Err(ModelLoadError::Corrupt { .. })));
    }

    #[test]
    fn test_out_of_range_feature_is_corrupt() {
        let mut value = artifact_json();
        value["tree"]["Split"]["feature_idx"] = json!(9);
        assert!(matches!(parse(&value), Err(ModelLoadError::Corrupt { .. })));
    }

    #[test]
    fn test_out_of_range_class_is_corrupt() {
        let mut value = artifact_json();
        value["tree"]["Split"]["left"]["Leaf"]["class_idx"] = json!(2);
        assert!(matches!(parse(&value), Err(ModelLoadError::Corrupt { .. })));
    }

    #[test]
    fn test_empty_classes_is_corrupt() {
        let mut value = artifact_json();
        value["classes"] = json!([]);
        assert!(matches!(parse(&value), Err(ModelLoadError::Corrupt { .. })));
    }

    #[test]
    fn test_truncated_bytes_are_corrupt() {
        let text = artifact_json().to_string();
        let result = ModelArtifact::from_slice(&text.as_bytes()[..text.len() / 2], &path());
        assert!(matches!(result, Err(ModelLoadError::Corrupt { .. })));
    }
}
