//! Decision tree classifier

use crate::error::InferenceError;
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::artifact::ModelArtifact;
use super::Classifier;

/// Decision tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Leaf node holding the index of the predicted class
    Leaf {
        class_idx: usize,
        #[serde(default)]
        n_samples: usize,
    },
    /// Internal node; samples with `x[feature_idx] <= threshold` go left
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
        #[serde(default)]
        n_samples: usize,
    },
}

impl TreeNode {
    /// Check that every split and leaf references a valid column or class
    pub(crate) fn check(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Leaf { class_idx, .. } => {
                    if *class_idx >= n_classes {
                        return Err(format!(
                            "leaf references class {} but only {} classes are declared",
                            class_idx, n_classes
                        ));
                    }
                }
                TreeNode::Split { feature_idx, threshold, left, right, .. } => {
                    if *feature_idx >= n_features {
                        return Err(format!(
                            "split references feature {} but only {} features are declared",
                            feature_idx, n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("split on feature {} has a non-finite threshold", feature_idx));
                    }
                    stack.push(left.as_ref());
                    stack.push(right.as_ref());
                }
            }
        }
        Ok(())
    }

    fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}

/// Pre-trained decision tree classifier
#[derive(Debug, Clone)]
pub struct DecisionTreeClassifier {
    model_type: String,
    feature_names: Vec<String>,
    classes: Vec<String>,
    root: TreeNode,
}

impl DecisionTreeClassifier {
    /// Build a classifier from an already checked artifact
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self {
            model_type: artifact.model_type,
            feature_names: artifact.feature_names,
            classes: artifact.classes,
            root: artifact.tree,
        }
    }

    /// Feature names in the column order the tree expects
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Get tree depth
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Get number of leaves
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    fn predict_sample(&self, sample: ArrayView1<f64>) -> Result<usize, InferenceError> {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { class_idx, .. } => return Ok(*class_idx),
                TreeNode::Split { feature_idx, threshold, left, right, .. } => {
                    let value = sample
                        .get(*feature_idx)
                        .copied()
                        .ok_or(InferenceError::FeatureCountMismatch {
                            expected: self.feature_names.len(),
                            actual: sample.len(),
                        })?;
                    node = if value <= *threshold { left.as_ref() } else { right.as_ref() };
                }
            }
        }
    }
}

impl Classifier for DecisionTreeClassifier {
    fn model_type(&self) -> &str {
        &self.model_type
    }

    fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<String>, InferenceError> {
        if x.ncols() != self.n_features() {
            return Err(InferenceError::FeatureCountMismatch {
                expected: self.n_features(),
                actual: x.ncols(),
            });
        }

        x.rows()
            .into_iter()
            .map(|row| {
                if let Some(column) = row.iter().position(|v| !v.is_finite()) {
                    return Err(InferenceError::NonFiniteFeature { column });
                }
                let index = self.predict_sample(row)?;
                self.classes
                    .get(index)
                    .cloned()
                    .ok_or(InferenceError::UnknownClass { index, n_classes: self.classes.len() })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ARTIFACT_FORMAT;
    use ndarray::array;

    fn leaf(class_idx: usize) -> Box<TreeNode> {
        Box::new(TreeNode::Leaf { class_idx, n_samples: 0 })
    }

    fn stump_classifier() -> DecisionTreeClassifier {
        DecisionTreeClassifier::from_artifact(ModelArtifact {
            format: ARTIFACT_FORMAT.to_string(),
            format_version: 1,
            model_type: "Decision Tree".to_string(),
            feature_names: vec!["a".to_string(), "b".to_string()],
            classes: vec!["low".to_string(), "mid".to_string(), "high".to_string()],
            tree: TreeNode::Split {
                feature_idx: 0,
                threshold: 1.0,
                left: leaf(0),
                right: Box::new(TreeNode::Split {
                    feature_idx: 1,
                    threshold: 5.0,
                    left: leaf(1),
                    right: leaf(2),
                    n_samples: 0,
                }),
                n_samples: 0,
            },
        })
    }

    #[test]
    fn test_predict_follows_thresholds() {
        let model = stump_classifier();
        let x = array![[0.5, 100.0], [1.0, 0.0], [2.0, 5.0], [2.0, 5.1]];
        let labels = model.predict(&x).unwrap();
        assert_eq!(labels, vec!["low", "low", "mid", "high"]);
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        let model = stump_classifier();
        let x = array![[0.5, 1.0, 2.0]];
        assert_eq!(
            model.predict(&x),
            Err(InferenceError::FeatureCountMismatch { expected: 2, actual: 3 })
        );
    }

    #[test]
    fn test_predict_rejects_nan() {
        let model = stump_classifier();
        let x = array![[2.0, f64::NAN]];
        assert_eq!(model.predict(&x), Err(InferenceError::NonFiniteFeature { column: 1 }));
    }

    #[test]
    fn test_predict_empty_batch() {
        let model = stump_classifier();
        let x = Array2::<f64>::zeros((0, 2));
        assert!(model.predict(&x).unwrap().is_empty());
    }

    #[test]
    fn test_tree_shape() {
        let model = stump_classifier();
        assert_eq!(model.depth(), 2);
        assert_eq!(model.n_leaves(), 3);
        assert_eq!(model.feature_names(), ["a", "b"]);
    }
}
