//! Model Feature Vector
//!
//! The fixed 7-field input tuple shared by the classifier and both
//! regressors, in training column order:
//! `[region_code, soil_code, rainfall, temperature, fertilizer_flag,
//! irrigation_flag, weather_code]`

use crate::encoding::EncodedCategories;

pub const FEATURE_COUNT: usize = 7;

/// Training column names, index-aligned with [`FeatureVector::as_array`]
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Region",
    "Soil_Type",
    "Rainfall_mm",
    "Temperature_Celsius",
    "Fertilizer_Used",
    "Irrigation_Used",
    "Weather_Condition",
];

/// Encoded model input for one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub region_code: u32,
    pub soil_code: u32,
    pub rainfall: f64,
    pub temperature: f64,
    pub fertilizer_flag: bool,
    pub irrigation_flag: bool,
    pub weather_code: u32,
}

impl FeatureVector {
    pub fn new(
        categories: &EncodedCategories,
        rainfall: f64,
        temperature: f64,
        fertilizer_flag: bool,
        irrigation_flag: bool,
    ) -> Self {
        Self {
            region_code: categories.region,
            soil_code: categories.soil,
            rainfall,
            temperature,
            fertilizer_flag,
            irrigation_flag,
            weather_code: categories.weather,
        }
    }

    /// Numeric tuple in training column order
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.region_code),
            f64::from(self.soil_code),
            self.rainfall,
            self.temperature,
            if self.fertilizer_flag { 1.0 } else { 0.0 },
            if self.irrigation_flag { 1.0 } else { 0.0 },
            f64::from(self.weather_code),
        ]
    }
}

/// Parse a usage flag submitted as a string literal
///
/// Only a case-insensitive "true" is true; every other value, including a
/// missing one, is false.
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw.map_or(false, |s| s.to_lowercase() == "true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_literal_contract() {
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some("TRUE")));
        assert!(parse_flag(Some("True")));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(Some("yes")));
        assert!(!parse_flag(Some("1")));
        assert!(!parse_flag(Some(" true")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_as_array_training_order() {
        let features = FeatureVector {
            region_code: 3,
            soil_code: 2,
            rainfall: 640.0,
            temperature: 24.5,
            fertilizer_flag: true,
            irrigation_flag: false,
            weather_code: 1,
        };
        assert_eq!(features.as_array(), [3.0, 2.0, 640.0, 24.5, 1.0, 0.0, 1.0]);
    }
}
