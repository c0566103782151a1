//! Predictor Orchestrator
//!
//! Runs the classifier and both regressors on one feature vector and selects
//! the candidate crops.
//!
//! ## Selection
//! 1. Sort classes by probability, highest first (ties: higher class index)
//! 2. Keep at most [`MAX_CANDIDATES`]
//! 3. Drop anything under [`MIN_CONFIDENCE_PCT`]
//!
//! Yield and harvest-time are predicted once per request from the same
//! feature vector, so every candidate carries the same two values.

use crate::error::PredictionError;
use crate::features::FeatureVector;
use crate::models::ModelBundle;
use smallvec::SmallVec;
use std::cmp::Ordering;

pub const MAX_CANDIDATES: usize = 3;
pub const MIN_CONFIDENCE_PCT: f64 = 5.0;

/// A crop label with its classifier confidence in percent
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCrop {
    pub crop: String,
    pub confidence: f64,
}

/// Model outputs for one request
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    pub ranked: SmallVec<[RankedCrop; MAX_CANDIDATES]>,
    pub predicted_yield: f64,
    pub predicted_harvest_days: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Orchestration {
    Candidates(Predictions),
    /// No class reached the confidence floor
    NoCandidates,
}

/// Invoke the models for one request
pub fn orchestrate(
    models: &ModelBundle,
    features: &FeatureVector,
) -> Result<Orchestration, PredictionError> {
    let classifier = models.classifier();
    let classes = classifier.classes();
    let probabilities = classifier.predict_proba(features)?;

    if probabilities.len() != classes.len() {
        return Err(PredictionError::ClassWidthMismatch {
            expected: classes.len(),
            got: probabilities.len(),
        });
    }
    if probabilities.iter().any(|p| !p.is_finite()) {
        return Err(PredictionError::NonFiniteOutput { model: "crop classifier" });
    }

    let ranked = select_candidates(classes, &probabilities);
    tracing::debug!(
        "Classifier ranked {} of {} classes above {}%",
        ranked.len(),
        classes.len(),
        MIN_CONFIDENCE_PCT
    );
    if ranked.is_empty() {
        return Ok(Orchestration::NoCandidates);
    }

    let predicted_yield = models.yield_model().predict(features)?;
    if !predicted_yield.is_finite() {
        return Err(PredictionError::NonFiniteOutput { model: "yield regressor" });
    }
    let predicted_harvest_days = models.harvest_model().predict(features)?;
    if !predicted_harvest_days.is_finite() {
        return Err(PredictionError::NonFiniteOutput { model: "harvest-time regressor" });
    }

    Ok(Orchestration::Candidates(Predictions {
        ranked,
        predicted_yield,
        predicted_harvest_days,
    }))
}

/// Top classes by probability, filtered by the confidence floor
///
/// `probabilities` must be index-aligned with `classes`.
pub fn select_candidates(
    classes: &[String],
    probabilities: &[f64],
) -> SmallVec<[RankedCrop; MAX_CANDIDATES]> {
    let mut order: Vec<usize> = (0..classes.len().min(probabilities.len())).collect();
    // Ascending stable sort, read from the top: equal probabilities come out
    // higher index first
    order.sort_by(|&a, &b| {
        probabilities[a]
            .partial_cmp(&probabilities[b])
            .unwrap_or(Ordering::Equal)
    });

    order
        .into_iter()
        .rev()
        .take(MAX_CANDIDATES)
        .map(|idx| RankedCrop {
            crop: classes[idx].clone(),
            confidence: probabilities[idx] * 100.0,
        })
        .filter(|c| c.confidence >= MIN_CONFIDENCE_PCT)
        .collect()
}
