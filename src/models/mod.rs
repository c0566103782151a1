//! Predictive Model Handles
//!
//! Trait seams for the crop classifier and the two scalar regressors, plus
//! the bundle of artifacts loaded once at startup.
//!
//! Artifacts (all JSON, in the model directory):
//! - `crop_recommendation_model.json` - forest classifier over crop labels
//! - `yield_prediction_model.json` - forest regressor, t/ha
//! - `harvest_time_model.json` - forest regressor, days
//! - `label_encoders.json` - categorical code tables

pub mod forest;

use crate::encoding::LabelEncoders;
use crate::error::{ModelLoadError, PredictionError};
use crate::features::FeatureVector;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub use forest::{DecisionTree, ForestClassifier, ForestRegressor, TreeNode};

pub const CLASSIFIER_FILE: &str = "crop_recommendation_model.json";
pub const YIELD_MODEL_FILE: &str = "yield_prediction_model.json";
pub const HARVEST_MODEL_FILE: &str = "harvest_time_model.json";
pub const ENCODERS_FILE: &str = "label_encoders.json";

/// Multi-class classifier over crop labels
pub trait CropClassifier: Send + Sync {
    /// Crop labels, index-aligned with [`CropClassifier::predict_proba`]
    fn classes(&self) -> &[String];

    /// Probability of every class for one feature vector
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, PredictionError>;
}

/// Regressor producing one scalar per feature vector
pub trait ScalarRegressor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError>;
}

/// Everything the request path needs from the training job
pub struct ModelBundle {
    classifier: Box<dyn CropClassifier>,
    yield_model: Box<dyn ScalarRegressor>,
    harvest_model: Box<dyn ScalarRegressor>,
    encoders: LabelEncoders,
}

impl ModelBundle {
    pub fn new(
        classifier: impl CropClassifier + 'static,
        yield_model: impl ScalarRegressor + 'static,
        harvest_model: impl ScalarRegressor + 'static,
        encoders: LabelEncoders,
    ) -> Self {
        Self {
            classifier: Box::new(classifier),
            yield_model: Box::new(yield_model),
            harvest_model: Box::new(harvest_model),
            encoders,
        }
    }

    /// Load all four artifacts from `model_dir`
    pub fn load(model_dir: &Path) -> Result<Self, ModelLoadError> {
        let classifier = ForestClassifier::load(&model_dir.join(CLASSIFIER_FILE))?;
        tracing::info!(
            "Loaded crop classifier ({} classes, {} trees)",
            classifier.classes().len(),
            classifier.tree_count()
        );

        let yield_model = ForestRegressor::load(&model_dir.join(YIELD_MODEL_FILE))?;
        let harvest_model = ForestRegressor::load(&model_dir.join(HARVEST_MODEL_FILE))?;
        tracing::info!(
            "Loaded yield ({} trees) and harvest-time ({} trees) regressors",
            yield_model.tree_count(),
            harvest_model.tree_count()
        );

        let encoders = LabelEncoders::load(&model_dir.join(ENCODERS_FILE))?;

        Ok(Self::new(classifier, yield_model, harvest_model, encoders))
    }

    pub fn classifier(&self) -> &dyn CropClassifier {
        self.classifier.as_ref()
    }

    pub fn yield_model(&self) -> &dyn ScalarRegressor {
        self.yield_model.as_ref()
    }

    pub fn harvest_model(&self) -> &dyn ScalarRegressor {
        self.harvest_model.as_ref()
    }

    pub fn encoders(&self) -> &LabelEncoders {
        &self.encoders
    }
}

/// Read and parse one JSON artifact
pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelLoadError> {
    if !path.exists() {
        return Err(ModelLoadError::Missing(path.display().to_string()));
    }

    let corrupt = |reason: String| ModelLoadError::Corrupt {
        path: path.display().to_string(),
        reason,
    };

    let contents = fs::read_to_string(path).map_err(|e| corrupt(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| corrupt(e.to_string()))
}
