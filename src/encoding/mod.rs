//! Categorical Encoder/Normalizer
//!
//! Turns free-form region/soil/weather strings into the integer codes the
//! models were trained with: alias normalization first, then label lookup.
//!
//! ## Miss policy
//! A value outside the training vocabulary is an [`EncodingMiss`]: logged,
//! never fatal. As with the training-time encoder, the three fields are
//! encoded as one unit, so a miss on any field sets all three codes to the
//! default code 0. This shifts predictions and is kept on purpose.

pub mod aliases;
pub mod label_encoders;

pub use aliases::{canonicalize, CategoricalField};
pub use label_encoders::LabelEncoders;

/// Code substituted when encoding fails
pub const DEFAULT_CODE: u32 = 0;

/// A categorical value the encoder did not know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingMiss {
    pub field: CategoricalField,
    /// Value after alias normalization
    pub value: String,
}

/// Result of encoding one request's categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCategories {
    pub region: u32,
    pub soil: u32,
    pub weather: u32,
    pub misses: Vec<EncodingMiss>,
}

impl EncodedCategories {
    pub fn is_exact(&self) -> bool {
        self.misses.is_empty()
    }
}

/// Encode region, soil type and weather condition
///
/// `None` inputs count as misses.
pub fn encode_categories(
    encoders: &LabelEncoders,
    region: Option<&str>,
    soil_type: Option<&str>,
    weather_condition: Option<&str>,
) -> EncodedCategories {
    let mut misses = Vec::new();
    let mut lookup = |field: CategoricalField, raw: Option<&str>| -> u32 {
        let canonical = canonicalize(field, raw.unwrap_or_default());
        match encoders.code(field, canonical) {
            Some(code) => code,
            None => {
                tracing::warn!(
                    "EncodingMiss: {} '{}' not in training vocabulary; using code {}",
                    field.artifact_key(),
                    canonical,
                    DEFAULT_CODE
                );
                misses.push(EncodingMiss {
                    field,
                    value: canonical.to_string(),
                });
                DEFAULT_CODE
            }
        }
    };

    let region = lookup(CategoricalField::Region, region);
    let soil = lookup(CategoricalField::SoilType, soil_type);
    let weather = lookup(CategoricalField::WeatherCondition, weather_condition);

    if misses.is_empty() {
        EncodedCategories { region, soil, weather, misses }
    } else {
        EncodedCategories {
            region: DEFAULT_CODE,
            soil: DEFAULT_CODE,
            weather: DEFAULT_CODE,
            misses,
        }
    }
}
