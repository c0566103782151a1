//! Tree-Ensemble Models
//!
//! Random forests exported by the training job as flat node arrays.
//!
//! Node encoding:
//! - Split: `{"feature": 2, "threshold": 512.5, "left": 1, "right": 4}`
//!   (go left when `x[feature] <= threshold`)
//! - Leaf: `{"value": [...]}` - class weights for the classifier, a single
//!   value for regressors
//!
//! Child indices must point forward (child > parent), which makes every
//! traversal from the root terminate. Structure is validated at load time.

use super::{read_artifact, CropClassifier, ScalarRegressor};
use crate::error::{ModelLoadError, PredictionError};
use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One node of a decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

/// A single decision tree, root at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Check node references and leaf widths
    fn validate(&self, leaf_width: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split { feature, threshold, left, right } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(format!("node {} splits on unknown feature {}", idx, feature));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", idx));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!("node {} has invalid child index {}", idx, child));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != leaf_width {
                        return Err(format!(
                            "leaf {} has {} values, expected {}",
                            idx,
                            value.len(),
                            leaf_width
                        ));
                    }
                    if value.iter().any(|v| !v.is_finite()) {
                        return Err(format!("leaf {} has a non-finite value", idx));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to the leaf selected by `x`
    fn leaf(&self, x: &[f64; FEATURE_COUNT]) -> Option<&[f64]> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx)? {
                TreeNode::Split { feature, threshold, left, right } => {
                    idx = if *x.get(*feature)? <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { value } => return Some(value),
            }
        }
    }
}

/// Reject feature vectors the trees cannot route meaningfully
fn finite_features(features: &FeatureVector) -> Result<[f64; FEATURE_COUNT], PredictionError> {
    let x = features.as_array();
    for (name, value) in FEATURE_NAMES.into_iter().zip(x) {
        if !value.is_finite() {
            return Err(PredictionError::NonFiniteFeature { name, value });
        }
    }
    Ok(x)
}

fn invalid(artifact: &str, reason: String) -> ModelLoadError {
    ModelLoadError::Invalid {
        artifact: artifact.to_string(),
        reason,
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Random-forest classifier over crop labels
///
/// Class probability = mean over trees of the leaf's normalized class weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestClassifier {
    classes: Vec<String>,
    trees: Vec<DecisionTree>,
}

impl ForestClassifier {
    pub fn new(classes: Vec<String>, trees: Vec<DecisionTree>) -> Result<Self, ModelLoadError> {
        let model = Self { classes, trees };
        model.validate()?;
        Ok(model)
    }

    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let model: Self = read_artifact(path)?;
        model.validate()?;
        Ok(model)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        const ARTIFACT: &str = "crop classifier";
        if self.classes.is_empty() {
            return Err(invalid(ARTIFACT, "no classes".to_string()));
        }
        if self.trees.is_empty() {
            return Err(invalid(ARTIFACT, "no trees".to_string()));
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate(self.classes.len())
                .map_err(|reason| invalid(ARTIFACT, format!("tree {}: {}", t, reason)))?;
        }
        Ok(())
    }
}

impl CropClassifier for ForestClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, PredictionError> {
        let x = finite_features(features)?;
        let mut probabilities = vec![0.0; self.classes.len()];

        for tree in &self.trees {
            let leaf = tree.leaf(&x).ok_or_else(|| PredictionError::Inference {
                model: "crop classifier",
                reason: "tree traversal left the node array".to_string(),
            })?;
            let total: f64 = leaf.iter().sum();
            if total > 0.0 {
                for (p, weight) in probabilities.iter_mut().zip(leaf) {
                    *p += weight / total;
                }
            }
        }

        let n_trees = self.trees.len() as f64;
        for p in probabilities.iter_mut() {
            *p /= n_trees;
        }
        Ok(probabilities)
    }
}

// ============================================================================
// Regressor
// ============================================================================

/// Random-forest regressor: mean of the selected leaf values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestRegressor {
    trees: Vec<DecisionTree>,
}

impl ForestRegressor {
    pub fn new(trees: Vec<DecisionTree>) -> Result<Self, ModelLoadError> {
        let model = Self { trees };
        model.validate()?;
        Ok(model)
    }

    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let model: Self = read_artifact(path)?;
        model.validate().map_err(|e| match e {
            ModelLoadError::Invalid { reason, .. } => invalid(&path.display().to_string(), reason),
            other => other,
        })?;
        Ok(model)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        const ARTIFACT: &str = "forest regressor";
        if self.trees.is_empty() {
            return Err(invalid(ARTIFACT, "no trees".to_string()));
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate(1)
                .map_err(|reason| invalid(ARTIFACT, format!("tree {}: {}", t, reason)))?;
        }
        Ok(())
    }
}

impl ScalarRegressor for ForestRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let x = finite_features(features)?;
        let mut total = 0.0;

        for tree in &self.trees {
            let leaf = tree.leaf(&x).ok_or_else(|| PredictionError::Inference {
                model: "forest regressor",
                reason: "tree traversal left the node array".to_string(),
            })?;
            total += leaf.first().copied().unwrap_or(0.0);
        }

        Ok(total / self.trees.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn features(rainfall: f64) -> FeatureVector {
        FeatureVector {
            region_code: 1,
            soil_code: 2,
            rainfall,
            temperature: 24.0,
            fertilizer_flag: true,
            irrigation_flag: false,
            weather_code: 0,
        }
    }

    /// Rainfall <= 500 → first leaf, else second leaf
    fn rainfall_stump(low: Vec<f64>, high: Vec<f64>) -> DecisionTree {
        DecisionTree::new(vec![
            TreeNode::Split { feature: 2, threshold: 500.0, left: 1, right: 2 },
            TreeNode::Leaf { value: low },
            TreeNode::Leaf { value: high },
        ])
    }

    #[test]
    fn test_classifier_averages_normalized_leaves() {
        let classes = vec!["Rice".to_string(), "Wheat".to_string()];
        let model = ForestClassifier::new(
            classes,
            vec![
                rainfall_stump(vec![0.0, 10.0], vec![30.0, 10.0]),
                rainfall_stump(vec![1.0, 1.0], vec![1.0, 0.0]),
            ],
        )
        .unwrap();

        // High rainfall: tree 1 → [0.75, 0.25], tree 2 → [1.0, 0.0]
        let proba = model.predict_proba(&features(800.0)).unwrap();
        assert_relative_eq!(proba[0], 0.875, epsilon = 1e-12);
        assert_relative_eq!(proba[1], 0.125, epsilon = 1e-12);

        // Low rainfall: tree 1 → [0, 1], tree 2 → [0.5, 0.5]
        let proba = model.predict_proba(&features(300.0)).unwrap();
        assert_relative_eq!(proba[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(proba[1], 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_threshold_is_inclusive_on_the_left() {
        let model = ForestRegressor::new(vec![rainfall_stump(vec![1.0], vec![2.0])]).unwrap();
        assert_eq!(model.predict(&features(500.0)).unwrap(), 1.0);
        assert_eq!(model.predict(&features(500.1)).unwrap(), 2.0);
    }

    #[test]
    fn test_regressor_mean_of_trees() {
        let model = ForestRegressor::new(vec![
            rainfall_stump(vec![3.0], vec![5.0]),
            rainfall_stump(vec![4.0], vec![6.0]),
        ])
        .unwrap();
        assert_relative_eq!(model.predict(&features(900.0)).unwrap(), 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_feature_is_prediction_error() {
        let model = ForestRegressor::new(vec![rainfall_stump(vec![3.0], vec![5.0])]).unwrap();
        let err = model.predict(&features(f64::NAN)).unwrap_err();
        assert!(matches!(err, PredictionError::NonFiniteFeature { name: "Rainfall_mm", .. }));
    }

    #[test]
    fn test_backward_child_index_is_rejected() {
        let tree = DecisionTree::new(vec![
            TreeNode::Leaf { value: vec![1.0] },
            TreeNode::Split { feature: 0, threshold: 1.0, left: 0, right: 0 },
        ]);
        // Root is a leaf, but node 1 points backwards
        assert!(ForestRegressor::new(vec![tree]).is_err());
    }

    #[test]
    fn test_leaf_width_must_match_classes() {
        let err = ForestClassifier::new(
            vec!["Rice".to_string(), "Wheat".to_string()],
            vec![rainfall_stump(vec![1.0], vec![1.0, 0.0])],
        )
        .unwrap_err();
        assert!(matches!(err, ModelLoadError::Invalid { .. }));
    }

    #[test]
    fn test_node_json_shape() {
        let json = r#"{"nodes": [
            {"feature": 2, "threshold": 500.0, "left": 1, "right": 2},
            {"value": [4.1]},
            {"value": [5.3]}
        ]}"#;
        let tree: DecisionTree = serde_json::from_str(json).unwrap();
        assert_eq!(tree, rainfall_stump(vec![4.1], vec![5.3]));
    }
}
