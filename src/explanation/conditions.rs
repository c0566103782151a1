use serde::{Deserialize, Serialize};

/// Whether a field value sits inside a crop's optimal band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    Optimal,
    Suboptimal,
    /// No historical data for the crop
    Unknown,
}

impl ConditionStatus {
    /// Inclusive on both ends
    pub fn classify(value: f64, min: f64, max: f64) -> Self {
        if min <= value && value <= max {
            ConditionStatus::Optimal
        } else {
            ConditionStatus::Suboptimal
        }
    }
}

/// Human-readable descriptor for a best-weather category
pub fn weather_descriptor(best_weather: &str) -> String {
    match best_weather.to_lowercase().as_str() {
        "sunny" => "Sunny conditions for optimal growth".to_string(),
        "rainy" => "Adequate rainfall during growing season".to_string(),
        "cloudy" => "Moderate conditions with cloud cover".to_string(),
        _ => best_weather.to_string(),
    }
}

/// "Yes" when the caller already applies the practice
pub fn practice_recommendation(in_use: bool) -> &'static str {
    if in_use {
        "Yes"
    } else {
        "Recommended"
    }
}
