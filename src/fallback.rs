//! Fallback Generator
//!
//! Fixed two-entry list returned whenever the model path cannot produce a
//! result. Only `suitability_factors` and the harvest month depend on the
//! request; everything else is constant.

use crate::explanation::{
    harvest_month, ConditionStatus, ExpectedConditions, GrowthStage, HarvestPrediction,
    RecommendationCandidate, SuitabilityFactors,
};
use chrono::NaiveDate;

pub const DEFAULT_RAINFALL: f64 = 200.0;
pub const DEFAULT_TEMPERATURE: f64 = 25.0;

/// Static description of one canned entry
struct FallbackCrop {
    name: &'static str,
    score: f64,
    yield_tons: f64,
    seed_required: &'static str,
    fertilizer_needed: &'static str,
    image: &'static str,
    harvest_days: i64,
    optimal_rainfall: &'static str,
    optimal_temperature: &'static str,
    best_weather: &'static str,
    rainfall_band: (f64, f64),
    temperature_band: (f64, f64),
}

const FALLBACK_CROPS: [FallbackCrop; 2] = [
    FallbackCrop {
        name: "Rice",
        score: 85.5,
        yield_tons: 4.2,
        seed_required: "25-30 kg/ha",
        fertilizer_needed: "NPK 14-14-14",
        image: "https://images.unsplash.com/photo-1586201375761-83865001e31c?w=200&h=150&fit=crop&crop=center",
        harvest_days: 120,
        optimal_rainfall: "150-300mm/month",
        optimal_temperature: "20-35°C",
        best_weather: "Rainy (during growth), Sunny (during harvest)",
        rainfall_band: (150.0, 300.0),
        temperature_band: (20.0, 35.0),
    },
    FallbackCrop {
        name: "Corn",
        score: 75.2,
        yield_tons: 3.8,
        seed_required: "20-25 kg/ha",
        fertilizer_needed: "NPK 15-15-15",
        image: "https://images.unsplash.com/photo-1551754655-cd27e38d2076?w=200&h=150&fit=crop&crop=center",
        harvest_days: 140,
        optimal_rainfall: "100-200mm/month",
        optimal_temperature: "18-30°C",
        best_weather: "Sunny with adequate moisture",
        rainfall_band: (75.0, 150.0),
        temperature_band: (15.0, 25.0),
    },
];

/// Missing, zero or non-finite values take the default
fn or_default(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => default,
    }
}

/// The canned recommendation list
///
/// Never fails. Suitability factors are evaluated against the caller's
/// rainfall and temperature (defaults 200 mm / 25 °C).
pub fn fallback_recommendations(
    rainfall: Option<f64>,
    temperature: Option<f64>,
    today: NaiveDate,
) -> Vec<RecommendationCandidate> {
    let rainfall = or_default(rainfall, DEFAULT_RAINFALL);
    let temperature = or_default(temperature, DEFAULT_TEMPERATURE);

    FALLBACK_CROPS
        .iter()
        .map(|crop| {
            let (rain_min, rain_max) = crop.rainfall_band;
            let (temp_min, temp_max) = crop.temperature_band;

            RecommendationCandidate {
                name: crop.name.to_string(),
                crop_type: "Grain".to_string(),
                suitability_score: crop.score,
                yield_display: format!("{:.1} tons/ha", crop.yield_tons),
                predicted_yield: crop.yield_tons,
                seed_required: crop.seed_required.to_string(),
                fertilizer_needed: crop.fertilizer_needed.to_string(),
                season: "Both seasons".to_string(),
                image: crop.image.to_string(),
                predicted_harvest_time: crop.harvest_days,
                expected_conditions: ExpectedConditions {
                    optimal_rainfall: crop.optimal_rainfall.to_string(),
                    optimal_temperature: crop.optimal_temperature.to_string(),
                    best_weather: crop.best_weather.to_string(),
                    recommended_fertilizer: "Yes".to_string(),
                    recommended_irrigation: "Yes".to_string(),
                },
                data_insights: None,
                suitability_factors: SuitabilityFactors {
                    rainfall: ConditionStatus::classify(rainfall, rain_min, rain_max),
                    temperature: ConditionStatus::classify(temperature, temp_min, temp_max),
                    rainfall_optimal_range: None,
                    temperature_optimal_range: None,
                },
                harvest_prediction: HarvestPrediction {
                    expected_days: crop.harvest_days,
                    // Small constant offsets cannot overflow a real calendar date
                    harvest_month: harvest_month(today, crop.harvest_days).unwrap_or_default(),
                    growth_stage: GrowthStage::from_days(crop.harvest_days),
                },
            }
        })
        .collect()
}
