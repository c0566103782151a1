//! Label Encoding Tables
//!
//! Per-field category → training code tables persisted by the training job.
//!
//! Artifact format (`label_encoders.json`):
//! ```json
//! {
//!   "Region": ["Eastern", "Northern", "Southern", "Western"],
//!   "Soil_Type": ["Chalky", "Clay", "Loamy", "Peaty", "Sandy", "Silty"],
//!   "Weather_Condition": ["Cloudy", "Rainy", "Sunny"]
//! }
//! ```
//! A value's code is its index in the class list.

use super::aliases::CategoricalField;
use crate::error::ModelLoadError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk shape of the encoder artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LabelEncoderFile {
    #[serde(rename = "Region")]
    region: Vec<String>,
    #[serde(rename = "Soil_Type")]
    soil_type: Vec<String>,
    #[serde(rename = "Weather_Condition")]
    weather_condition: Vec<String>,
}

/// Lookup tables for all categorical fields
#[derive(Debug, Clone)]
pub struct LabelEncoders {
    region: FxHashMap<String, u32>,
    soil_type: FxHashMap<String, u32>,
    weather_condition: FxHashMap<String, u32>,
}

impl LabelEncoders {
    /// Build from class lists in training order
    pub fn new(
        region: Vec<String>,
        soil_type: Vec<String>,
        weather_condition: Vec<String>,
    ) -> Result<Self, ModelLoadError> {
        Ok(Self {
            region: index_classes(CategoricalField::Region, region)?,
            soil_type: index_classes(CategoricalField::SoilType, soil_type)?,
            weather_condition: index_classes(CategoricalField::WeatherCondition, weather_condition)?,
        })
    }

    /// Load the JSON artifact
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let file: LabelEncoderFile = crate::models::read_artifact(path)?;
        Self::new(file.region, file.soil_type, file.weather_condition)
    }

    /// Training code of a canonical value, `None` when outside the vocabulary
    pub fn code(&self, field: CategoricalField, value: &str) -> Option<u32> {
        self.table(field).get(value).copied()
    }

    /// Number of known classes for a field
    pub fn class_count(&self, field: CategoricalField) -> usize {
        self.table(field).len()
    }

    fn table(&self, field: CategoricalField) -> &FxHashMap<String, u32> {
        match field {
            CategoricalField::Region => &self.region,
            CategoricalField::SoilType => &self.soil_type,
            CategoricalField::WeatherCondition => &self.weather_condition,
        }
    }
}

fn index_classes(
    field: CategoricalField,
    classes: Vec<String>,
) -> Result<FxHashMap<String, u32>, ModelLoadError> {
    let invalid = |reason: String| ModelLoadError::Invalid {
        artifact: format!("label encoder '{}'", field.artifact_key()),
        reason,
    };

    if classes.is_empty() {
        return Err(invalid("no classes".to_string()));
    }

    let mut table = FxHashMap::default();
    for (code, class) in classes.into_iter().enumerate() {
        let code = u32::try_from(code).map_err(|_| invalid("too many classes".to_string()))?;
        if let Some(previous) = table.insert(class.clone(), code) {
            return Err(invalid(format!(
                "class '{}' listed twice (codes {} and {})",
                class, previous, code
            )));
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_codes_follow_class_order() {
        let encoders = LabelEncoders::new(
            strings(&["Eastern", "Northern", "Southern", "Western"]),
            strings(&["Clay", "Loamy"]),
            strings(&["Cloudy", "Rainy", "Sunny"]),
        )
        .unwrap();

        assert_eq!(encoders.code(CategoricalField::Region, "Eastern"), Some(0));
        assert_eq!(encoders.code(CategoricalField::Region, "Western"), Some(3));
        assert_eq!(encoders.code(CategoricalField::SoilType, "Loamy"), Some(1));
        assert_eq!(encoders.code(CategoricalField::WeatherCondition, "Sunny"), Some(2));
        assert_eq!(encoders.code(CategoricalField::Region, "Atlantis"), None);
        assert_eq!(encoders.class_count(CategoricalField::Region), 4);
    }

    #[test]
    fn test_duplicate_class_is_invalid() {
        let err = LabelEncoders::new(
            strings(&["Eastern", "Eastern"]),
            strings(&["Clay"]),
            strings(&["Sunny"]),
        )
        .unwrap_err();
        assert!(matches!(err, ModelLoadError::Invalid { .. }));
    }

    #[test]
    fn test_empty_field_is_invalid() {
        let err = LabelEncoders::new(strings(&["Eastern"]), Vec::new(), strings(&["Sunny"])).unwrap_err();
        assert!(matches!(err, ModelLoadError::Invalid { .. }));
    }
}
