use serde::{Deserialize, Serialize};

use crate::explanation::conditions::ConditionStatus;
use crate::explanation::harvest::GrowthStage;

/// One explained, ranked crop recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationCandidate {
    pub name: String,
    #[serde(rename = "type")]
    pub crop_type: String,
    /// Classifier confidence in percent, 1 decimal
    #[serde(rename = "suitabilityScore")]
    pub suitability_score: f64,
    #[serde(rename = "yield")]
    pub yield_display: String, // "4.2 tons/ha"
    pub predicted_yield: f64,
    #[serde(rename = "seedRequired")]
    pub seed_required: String,
    #[serde(rename = "fertilizerNeeded")]
    pub fertilizer_needed: String,
    pub season: String,
    pub image: String,
    /// Whole days
    pub predicted_harvest_time: i64,
    pub expected_conditions: ExpectedConditions,
    /// Absent on fallback entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_insights: Option<DataInsights>,
    pub suitability_factors: SuitabilityFactors,
    pub harvest_prediction: HarvestPrediction,
}

/// Conditions the crop does best in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedConditions {
    pub optimal_rainfall: String,    // "420.0-610.0mm"
    pub optimal_temperature: String, // "21.5-27.0°C"
    pub best_weather: String,
    pub recommended_fertilizer: String, // "Yes" / "Recommended"
    pub recommended_irrigation: String,
}

/// Benchmarks mined from the historical corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataInsights {
    pub average_yield_benchmark: String,
    pub maximum_yield_potential: String,
    pub minimum_yield_recorded: String,
    pub typical_harvest_time: String, // "112 days"
    pub harvest_range: String,        // "90-140 days"
    pub fertilizer_success_rate: String,
    pub irrigation_success_rate: String,
    pub best_soil_type: String,
    pub best_region: String,
    pub data_samples: String, // "Based on 812 real farm records"
    pub high_yield_samples: usize,
}

/// How the caller's field compares with the crop's optimal band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityFactors {
    pub rainfall: ConditionStatus,
    pub temperature: ConditionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rainfall_optimal_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_optimal_range: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestPrediction {
    pub expected_days: i64,
    pub harvest_month: String, // "February 2027"
    pub growth_stage: GrowthStage,
}
