//! Recommendation Composer
//!
//! Merges model predictions, corpus benchmarks and catalog metadata into
//! explained recommendation records.
//!
//! ## Architecture
//! - One record per ranked candidate; a candidate that cannot be composed
//!   is logged and skipped
//! - Yield and harvest-time predictions are shared by all candidates
//! - Output order: suitability score, highest first

use crate::catalog::CropCatalog;
use crate::error::CompositionError;
use crate::explanation::conditions::{practice_recommendation, weather_descriptor, ConditionStatus};
use crate::explanation::harvest::{harvest_month, GrowthStage};
use crate::explanation::types::*;
use crate::insights::{
    format_rainfall_range, format_temperature_range, CropInsight, FarmingPractice, InsightTable,
    OptimalConditions, YieldBenchmark,
};
use crate::orchestrator::{Predictions, RankedCrop};
use crate::utils::round_to;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Largest harvest horizon accepted when dating a harvest
const MAX_HARVEST_DAYS: f64 = 1.0e7;

/// The caller's field as the composer needs it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConditions {
    pub rainfall: f64,
    pub temperature: f64,
    pub fertilizer_used: bool,
    pub irrigation_used: bool,
}

/// Build the ranked recommendation list
///
/// Fails only when no candidate could be composed.
pub fn compose(
    predictions: &Predictions,
    field: &FieldConditions,
    insights: &InsightTable,
    catalog: &CropCatalog,
    today: NaiveDate,
) -> Result<Vec<RecommendationCandidate>, CompositionError> {
    let mut composed = Vec::with_capacity(predictions.ranked.len());
    let mut rejected = 0;

    for ranked in &predictions.ranked {
        match compose_candidate(ranked, predictions, field, insights, catalog, today) {
            Ok(candidate) => composed.push(candidate),
            Err(e) => {
                tracing::warn!("Skipping candidate '{}': {}", ranked.crop, e);
                rejected += 1;
            }
        }
    }

    if composed.is_empty() {
        return Err(CompositionError::NothingComposed { rejected });
    }

    composed.sort_by(|a, b| {
        b.suitability_score
            .partial_cmp(&a.suitability_score)
            .unwrap_or(Ordering::Equal)
    });
    Ok(composed)
}

/// Build one explained record
pub fn compose_candidate(
    ranked: &RankedCrop,
    predictions: &Predictions,
    field: &FieldConditions,
    insights: &InsightTable,
    catalog: &CropCatalog,
    today: NaiveDate,
) -> Result<RecommendationCandidate, CompositionError> {
    let crop = ranked.crop.as_str();

    // STEP 1: Validate the shared predictions
    let non_finite = |quantity: &'static str| CompositionError::NonFinitePrediction {
        crop: crop.to_string(),
        quantity,
    };
    if !ranked.confidence.is_finite() {
        return Err(non_finite("confidence"));
    }
    if !predictions.predicted_yield.is_finite() {
        return Err(non_finite("yield"));
    }
    if !predictions.predicted_harvest_days.is_finite() {
        return Err(non_finite("harvest time"));
    }

    let harvest_days = predictions.predicted_harvest_days.trunc();
    if harvest_days.abs() > MAX_HARVEST_DAYS {
        return Err(CompositionError::HarvestDateOutOfRange {
            crop: crop.to_string(),
            days: harvest_days as i64,
        });
    }
    let expected_days = harvest_days as i64;
    let month = harvest_month(today, expected_days).ok_or_else(|| {
        CompositionError::HarvestDateOutOfRange {
            crop: crop.to_string(),
            days: expected_days,
        }
    })?;

    // STEP 2: Look up catalog and corpus data
    let profile = catalog.profile_or_default(crop);
    let insight = insights.get(crop);
    if insight.is_none() {
        tracing::debug!("No historical insight for '{}'; using defaults", crop);
    }

    // STEP 3: Assemble
    Ok(RecommendationCandidate {
        name: profile.name,
        crop_type: profile.crop_type,
        suitability_score: round_to(ranked.confidence, 1),
        yield_display: format!("{:.1} tons/ha", predictions.predicted_yield),
        predicted_yield: predictions.predicted_yield,
        seed_required: profile.seed_required,
        fertilizer_needed: profile.fertilizer_needed,
        season: profile.season,
        image: profile.image,
        predicted_harvest_time: expected_days,
        expected_conditions: expected_conditions(insight, field),
        data_insights: Some(data_insights(insight)),
        suitability_factors: suitability_factors(insight, field),
        harvest_prediction: HarvestPrediction {
            expected_days,
            harvest_month: month,
            growth_stage: GrowthStage::from_days(expected_days),
        },
    })
}

fn expected_conditions(insight: Option<&CropInsight>, field: &FieldConditions) -> ExpectedConditions {
    let optimal = OptimalConditions::from_insight(insight);
    ExpectedConditions {
        optimal_rainfall: optimal.rainfall_range,
        optimal_temperature: optimal.temperature_range,
        best_weather: weather_descriptor(&optimal.best_weather),
        recommended_fertilizer: practice_recommendation(field.fertilizer_used).to_string(),
        recommended_irrigation: practice_recommendation(field.irrigation_used).to_string(),
    }
}

fn data_insights(insight: Option<&CropInsight>) -> DataInsights {
    let benchmark = YieldBenchmark::from_insight(insight);
    let practice = FarmingPractice::from_insight(insight);

    DataInsights {
        average_yield_benchmark: format!("{:.1} tons/ha", benchmark.average_yield),
        maximum_yield_potential: format!("{:.1} tons/ha", benchmark.maximum_yield),
        minimum_yield_recorded: format!("{:.1} tons/ha", benchmark.minimum_yield),
        typical_harvest_time: format!("{:.0} days", benchmark.expected_harvest_days),
        harvest_range: format!(
            "{:.0}-{:.0} days",
            benchmark.min_harvest_days, benchmark.max_harvest_days
        ),
        fertilizer_success_rate: practice.fertilizer_summary(),
        irrigation_success_rate: practice.irrigation_summary(),
        best_soil_type: practice.best_soil,
        best_region: practice.best_region,
        data_samples: format!("Based on {} real farm records", benchmark.data_samples),
        high_yield_samples: benchmark.high_yield_samples,
    }
}

fn suitability_factors(insight: Option<&CropInsight>, field: &FieldConditions) -> SuitabilityFactors {
    match insight {
        Some(i) => SuitabilityFactors {
            rainfall: ConditionStatus::classify(
                field.rainfall,
                i.optimal_rainfall_min,
                i.optimal_rainfall_max,
            ),
            temperature: ConditionStatus::classify(
                field.temperature,
                i.optimal_temp_min,
                i.optimal_temp_max,
            ),
            rainfall_optimal_range: Some(format_rainfall_range(
                i.optimal_rainfall_min,
                i.optimal_rainfall_max,
            )),
            temperature_optimal_range: Some(format_temperature_range(
                i.optimal_temp_min,
                i.optimal_temp_max,
            )),
        },
        None => SuitabilityFactors {
            rainfall: ConditionStatus::Unknown,
            temperature: ConditionStatus::Unknown,
            rainfall_optimal_range: None,
            temperature_optimal_range: None,
        },
    }
}
