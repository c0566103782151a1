//! Canonical Vocabulary Aliases
//!
//! Maps the category spellings users submit onto the vocabulary the models
//! were trained on. Matching is exact; unmapped values pass through unchanged
//! and are left for the label encoder to accept or reject.

use serde::{Deserialize, Serialize};

/// Categorical model inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalField {
    Region,
    SoilType,
    WeatherCondition,
}

impl CategoricalField {
    /// Key of this field in the label-encoder artifact and the corpus header
    pub fn artifact_key(&self) -> &'static str {
        match self {
            CategoricalField::Region => "Region",
            CategoricalField::SoilType => "Soil_Type",
            CategoricalField::WeatherCondition => "Weather_Condition",
        }
    }

    pub fn all() -> &'static [CategoricalField] {
        &[
            CategoricalField::Region,
            CategoricalField::SoilType,
            CategoricalField::WeatherCondition,
        ]
    }

    fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            CategoricalField::Region => REGION_ALIASES,
            CategoricalField::SoilType => SOIL_ALIASES,
            CategoricalField::WeatherCondition => WEATHER_ALIASES,
        }
    }
}

static REGION_ALIASES: &[(&str, &str)] = &[
    ("North", "Northern"),
    ("South", "Southern"),
    ("East", "Eastern"),
    ("West", "Western"),
];

static SOIL_ALIASES: &[(&str, &str)] = &[
    ("Clay", "Clay"),
    ("Sandy", "Sandy"),
    ("Loam", "Loamy"),
    ("Silt", "Silty"),
    ("Peaty", "Peaty"),
    ("Chalky", "Chalky"),
];

static WEATHER_ALIASES: &[(&str, &str)] = &[
    ("Sunny", "Sunny"),
    ("Rainy", "Rainy"),
    ("Cloudy", "Cloudy"),
];

/// Map a raw input value to the canonical vocabulary
pub fn canonicalize(field: CategoricalField, raw: &str) -> &str {
    field
        .aliases()
        .iter()
        .find(|(alias, _)| *alias == raw)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(raw)
}
