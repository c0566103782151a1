//! Benchmark Views
//!
//! Read-side views over an optional [`CropInsight`]. A crop missing from the
//! corpus still gets a full set of values from the documented defaults.

use super::CropInsight;

// ============================================================================
// Defaults for crops without historical records
// ============================================================================

pub const DEFAULT_RAINFALL_RANGE: &str = "100-200mm";
pub const DEFAULT_TEMPERATURE_RANGE: &str = "20-30°C";
pub const DEFAULT_BEST_WEATHER: &str = "Sunny";

pub const DEFAULT_AVG_YIELD: f64 = 3.0;
pub const DEFAULT_MAX_YIELD: f64 = 5.0;
pub const DEFAULT_MIN_YIELD: f64 = 1.0;
pub const DEFAULT_EXPECTED_HARVEST_DAYS: f64 = 90.0;
pub const DEFAULT_MIN_HARVEST_DAYS: f64 = 60.0;
pub const DEFAULT_MAX_HARVEST_DAYS: f64 = 120.0;

pub const DEFAULT_FERTILIZER_RATE: f64 = 70.0;
pub const DEFAULT_IRRIGATION_RATE: f64 = 60.0;
pub const DEFAULT_BEST_SOIL: &str = "Loamy";
pub const DEFAULT_BEST_REGION: &str = "Various";

/// Format a rainfall band, e.g. "420.0-610.0mm"
pub fn format_rainfall_range(min: f64, max: f64) -> String {
    format!("{:.1}-{:.1}mm", min, max)
}

/// Format a temperature band, e.g. "21.5-27.0°C"
pub fn format_temperature_range(min: f64, max: f64) -> String {
    format!("{:.1}-{:.1}°C", min, max)
}

/// Optimal growing conditions as display strings
#[derive(Debug, Clone, PartialEq)]
pub struct OptimalConditions {
    pub rainfall_range: String,
    pub temperature_range: String,
    /// Raw best-weather category (e.g. "Rainy")
    pub best_weather: String,
}

impl OptimalConditions {
    pub fn from_insight(insight: Option<&CropInsight>) -> Self {
        match insight {
            Some(i) => Self {
                rainfall_range: format_rainfall_range(i.optimal_rainfall_min, i.optimal_rainfall_max),
                temperature_range: format_temperature_range(i.optimal_temp_min, i.optimal_temp_max),
                best_weather: i.best_weather.clone(),
            },
            None => Self {
                rainfall_range: DEFAULT_RAINFALL_RANGE.to_string(),
                temperature_range: DEFAULT_TEMPERATURE_RANGE.to_string(),
                best_weather: DEFAULT_BEST_WEATHER.to_string(),
            },
        }
    }
}

/// Yield and harvest benchmarks
#[derive(Debug, Clone, PartialEq)]
pub struct YieldBenchmark {
    pub average_yield: f64,
    pub maximum_yield: f64,
    pub minimum_yield: f64,
    pub expected_harvest_days: f64,
    pub min_harvest_days: f64,
    pub max_harvest_days: f64,
    pub data_samples: usize,
    pub high_yield_samples: usize,
}

impl YieldBenchmark {
    pub fn from_insight(insight: Option<&CropInsight>) -> Self {
        match insight {
            Some(i) => Self {
                average_yield: i.avg_yield,
                maximum_yield: i.max_yield,
                minimum_yield: i.min_yield,
                expected_harvest_days: i.avg_harvest_days,
                min_harvest_days: i.min_harvest_days,
                max_harvest_days: i.max_harvest_days,
                data_samples: i.total_samples,
                high_yield_samples: i.high_yield_sample_count,
            },
            None => Self {
                average_yield: DEFAULT_AVG_YIELD,
                maximum_yield: DEFAULT_MAX_YIELD,
                minimum_yield: DEFAULT_MIN_YIELD,
                expected_harvest_days: DEFAULT_EXPECTED_HARVEST_DAYS,
                min_harvest_days: DEFAULT_MIN_HARVEST_DAYS,
                max_harvest_days: DEFAULT_MAX_HARVEST_DAYS,
                data_samples: 0,
                high_yield_samples: 0,
            },
        }
    }
}

/// Farming practices observed across the crop's records
#[derive(Debug, Clone, PartialEq)]
pub struct FarmingPractice {
    pub fertilizer_usage_rate: f64,
    pub irrigation_usage_rate: f64,
    pub best_soil: String,
    pub best_region: String,
}

impl FarmingPractice {
    pub fn from_insight(insight: Option<&CropInsight>) -> Self {
        match insight {
            Some(i) => Self {
                fertilizer_usage_rate: i.fertilizer_usage_rate,
                irrigation_usage_rate: i.irrigation_usage_rate,
                best_soil: i.best_soil.clone(),
                best_region: i.best_region.clone(),
            },
            None => Self {
                fertilizer_usage_rate: DEFAULT_FERTILIZER_RATE,
                irrigation_usage_rate: DEFAULT_IRRIGATION_RATE,
                best_soil: DEFAULT_BEST_SOIL.to_string(),
                best_region: DEFAULT_BEST_REGION.to_string(),
            },
        }
    }

    pub fn fertilizer_summary(&self) -> String {
        format!("{:.1}% of successful farms use fertilizer", self.fertilizer_usage_rate)
    }

    pub fn irrigation_summary(&self) -> String {
        format!("{:.1}% of successful farms use irrigation", self.irrigation_usage_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_unknown_crop() {
        let conditions = OptimalConditions::from_insight(None);
        assert_eq!(conditions.rainfall_range, "100-200mm");
        assert_eq!(conditions.temperature_range, "20-30°C");
        assert_eq!(conditions.best_weather, "Sunny");

        let benchmark = YieldBenchmark::from_insight(None);
        assert_eq!(benchmark.average_yield, 3.0);
        assert_eq!(benchmark.min_harvest_days, 60.0);
        assert_eq!(benchmark.max_harvest_days, 120.0);
        assert_eq!(benchmark.data_samples, 0);

        let practice = FarmingPractice::from_insight(None);
        assert_eq!(practice.fertilizer_summary(), "70.0% of successful farms use fertilizer");
        assert_eq!(practice.irrigation_summary(), "60.0% of successful farms use irrigation");
        assert_eq!(practice.best_soil, "Loamy");
        assert_eq!(practice.best_region, "Various");
    }

    #[test]
    fn test_range_formatting() {
        assert_eq!(format_rainfall_range(420.0, 610.0), "420.0-610.0mm");
        assert_eq!(format_temperature_range(21.5, 27.0), "21.5-27.0°C");
    }
}
