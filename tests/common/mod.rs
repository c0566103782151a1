//! Shared fixtures: synthetic corpus, hand-built forests, stub models

#![allow(dead_code)]

use chrono::NaiveDate;
use crop_recommender_rust::catalog::CropCatalog;
use crop_recommender_rust::encoding::LabelEncoders;
use crop_recommender_rust::models::{
    CropClassifier, DecisionTree, ForestClassifier, ForestRegressor, ModelBundle, ScalarRegressor,
    TreeNode,
};
use crop_recommender_rust::{
    EngineContext, FeatureVector, HistoricalCorpus, HistoricalRecord, InsightTable, PredictionError,
};

pub const CLASSES: [&str; 4] = ["Barley", "Maize", "Rice", "Wheat"];

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn encoders() -> LabelEncoders {
    LabelEncoders::new(
        strings(&["Eastern", "Northern", "Southern", "Western"]),
        strings(&["Chalky", "Clay", "Loamy", "Peaty", "Sandy", "Silty"]),
        strings(&["Cloudy", "Rainy", "Sunny"]),
    )
    .unwrap()
}

/// Rainfall <= 500 → `low`, else `high`
pub fn rainfall_stump(low: Vec<f64>, high: Vec<f64>) -> DecisionTree {
    DecisionTree::new(vec![
        TreeNode::Split { feature: 2, threshold: 500.0, left: 1, right: 2 },
        TreeNode::Leaf { value: low },
        TreeNode::Leaf { value: high },
    ])
}

/// Dry fields favour Wheat (60/25/10/5), wet fields favour Rice (70/18/10/2)
pub fn classifier() -> ForestClassifier {
    ForestClassifier::new(
        strings(&CLASSES),
        vec![rainfall_stump(vec![5.0, 25.0, 10.0, 60.0], vec![2.0, 18.0, 70.0, 10.0])],
    )
    .unwrap()
}

pub fn constant_regressor(value: f64) -> ForestRegressor {
    ForestRegressor::new(vec![DecisionTree::new(vec![TreeNode::Leaf { value: vec![value] }])]).unwrap()
}

/// Yield 4.27 t/ha, harvest 118.6 days
pub fn bundle() -> ModelBundle {
    ModelBundle::new(classifier(), constant_regressor(4.27), constant_regressor(118.6), encoders())
}

pub fn record(crop: &str, rainfall: f64, temperature: f64, yield_t: f64, days: f64) -> HistoricalRecord {
    HistoricalRecord {
        crop: crop.to_string(),
        region: "Southern".to_string(),
        soil_type: "Clay".to_string(),
        weather_condition: "Rainy".to_string(),
        rainfall_mm: rainfall,
        temperature_c: temperature,
        fertilizer_used: true,
        irrigation_used: false,
        yield_tons_per_ha: yield_t,
        days_to_harvest: days,
    }
}

/// Rice: top quartile is the two 6.0 t/ha records, band 650-750 mm / 25-27 °C.
/// Wheat: a single record.
pub fn corpus() -> HistoricalCorpus {
    HistoricalCorpus::from_records(vec![
        record("Rice", 300.0, 18.0, 2.0, 100.0),
        record("Rice", 400.0, 20.0, 3.0, 110.0),
        record("Rice", 500.0, 22.0, 4.0, 120.0),
        record("Rice", 600.0, 24.0, 6.0, 125.0),
        record("Rice", 800.0, 28.0, 6.0, 130.0),
        record("Wheat", 420.0, 17.5, 3.4, 95.0),
    ])
}

pub fn context() -> EngineContext {
    EngineContext::from_parts(
        InsightTable::from_corpus(&corpus()),
        Some(bundle()),
        CropCatalog::builtin(),
    )
}

pub fn context_with(models: ModelBundle) -> EngineContext {
    EngineContext::from_parts(InsightTable::from_corpus(&corpus()), Some(models), CropCatalog::builtin())
}

// ============================================================================
// Stub models
// ============================================================================

/// Returns fixed probabilities regardless of input
pub struct FixedClassifier {
    pub classes: Vec<String>,
    pub probabilities: Vec<f64>,
}

impl CropClassifier for FixedClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>, PredictionError> {
        Ok(self.probabilities.clone())
    }
}

pub struct FailingClassifier {
    pub classes: Vec<String>,
}

impl CropClassifier for FailingClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>, PredictionError> {
        Err(PredictionError::Inference {
            model: "crop classifier",
            reason: "model backend unavailable".to_string(),
        })
    }
}

pub struct FixedRegressor(pub f64);

impl ScalarRegressor for FixedRegressor {
    fn predict(&self, _features: &FeatureVector) -> Result<f64, PredictionError> {
        Ok(self.0)
    }
}
