//! Recommendation Engine
//!
//! Per-request pipeline:
//! 1. Encode categories and build the feature vector
//! 2. Orchestrate the models
//! 3. Compose explained records
//!
//! Any stage failure ends on the fallback list. [`recommend`] never fails;
//! [`try_recommend`] exposes why a request degraded.

use crate::encoding::{encode_categories, LabelEncoders};
use crate::error::EngineError;
use crate::explanation::{compose, FieldConditions, RecommendationCandidate};
use crate::fallback::fallback_recommendations;
use crate::features::{parse_flag, FeatureVector};
use crate::orchestrator::{orchestrate, Orchestration};
use crate::context::EngineContext;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_DAYS_TO_HARVEST: i64 = 90;

/// Caller inputs for one recommendation
///
/// Every field is optional. Accepts snake_case or camelCase keys; numbers
/// may arrive as JSON numbers or numeric strings, flags as booleans or
/// strings. A number field holding non-numeric text decodes as NaN, which
/// sends the request to the fallback list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, alias = "soilType")]
    pub soil_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rainfall: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
    #[serde(default, alias = "fertilizerUsed", deserialize_with = "lenient_flag")]
    pub fertilizer_used: Option<String>,
    #[serde(default, alias = "irrigationUsed", deserialize_with = "lenient_flag")]
    pub irrigation_used: Option<String>,
    #[serde(default, alias = "weatherCondition")]
    pub weather_condition: Option<String>,
    #[serde(default, alias = "daysToHarvest", deserialize_with = "lenient_number")]
    pub days_to_harvest: Option<f64>,
}

impl RecommendationRequest {
    /// Request from the eight positional inputs
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        region: &str,
        soil_type: &str,
        rainfall: f64,
        temperature: f64,
        fertilizer_used: &str,
        irrigation_used: &str,
        weather_condition: &str,
        days_to_harvest: i64,
    ) -> Self {
        Self {
            region: Some(region.to_string()),
            soil_type: Some(soil_type.to_string()),
            rainfall: Some(rainfall),
            temperature: Some(temperature),
            fertilizer_used: Some(fertilizer_used.to_string()),
            irrigation_used: Some(irrigation_used.to_string()),
            weather_condition: Some(weather_condition.to_string()),
            days_to_harvest: Some(days_to_harvest as f64),
        }
    }

    /// Desired horizon; missing or zero means the default
    pub fn desired_harvest_days(&self) -> i64 {
        match self.days_to_harvest {
            Some(d) if d.is_finite() && d.trunc() != 0.0 => d.trunc() as i64,
            _ => DEFAULT_DAYS_TO_HARVEST,
        }
    }
}

/// Recommend crops for today's date
pub fn recommend(ctx: &EngineContext, request: &RecommendationRequest) -> Vec<RecommendationCandidate> {
    recommend_on(ctx, request, Local::now().date_naive())
}

/// Recommend crops, dating harvests from `today`
pub fn recommend_on(
    ctx: &EngineContext,
    request: &RecommendationRequest,
    today: NaiveDate,
) -> Vec<RecommendationCandidate> {
    match try_recommend(ctx, request, today) {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!("Serving fallback recommendations: {}", e);
            fallback_recommendations(request.rainfall, request.temperature, today)
        }
    }
}

/// Run the model path, reporting why it could not produce a list
pub fn try_recommend(
    ctx: &EngineContext,
    request: &RecommendationRequest,
    today: NaiveDate,
) -> Result<Vec<RecommendationCandidate>, EngineError> {
    let models = ctx.models().ok_or(EngineError::FallbackOnly)?;

    tracing::debug!(
        "Recommendation request: region={:?} soil={:?} rainfall={:?} temperature={:?} desired_days={}",
        request.region,
        request.soil_type,
        request.rainfall,
        request.temperature,
        request.desired_harvest_days()
    );

    let (features, field) = build_features(models.encoders(), request);

    match orchestrate(models, &features)? {
        Orchestration::NoCandidates => Err(EngineError::NoCandidates),
        Orchestration::Candidates(predictions) => {
            let candidates = compose(&predictions, &field, ctx.insights(), ctx.catalog(), today)?;
            tracing::debug!("Composed {} recommendations", candidates.len());
            Ok(candidates)
        }
    }
}

/// Feature vector and field description for one request
///
/// Missing rainfall/temperature are 0 on the model path.
pub fn build_features(
    encoders: &LabelEncoders,
    request: &RecommendationRequest,
) -> (FeatureVector, FieldConditions) {
    let field = FieldConditions {
        rainfall: request.rainfall.unwrap_or(0.0),
        temperature: request.temperature.unwrap_or(0.0),
        fertilizer_used: parse_flag(request.fertilizer_used.as_deref()),
        irrigation_used: parse_flag(request.irrigation_used.as_deref()),
    };

    let categories = encode_categories(
        encoders,
        request.region.as_deref(),
        request.soil_type.as_deref(),
        request.weather_condition.as_deref(),
    );

    let features = FeatureVector::new(
        &categories,
        field.rainfall,
        field.temperature,
        field.fertilizer_used,
        field.irrigation_used,
    );
    (features, field)
}

// ============================================================================
// Lenient request decoding
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrString> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                // Unparseable text becomes NaN so the model path rejects it
                match trimmed.parse::<f64>() {
                    Ok(n) => Some(n),
                    Err(_) => {
                        tracing::warn!("Non-numeric request value '{}'", s);
                        Some(f64::NAN)
                    }
                }
            }
        }
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Text(String),
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BoolOrString> = Option::deserialize(deserializer)?;
    Ok(raw.map(|v| match v {
        BoolOrString::Bool(b) => b.to_string(),
        BoolOrString::Text(s) => s,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_camel_case_and_strings() {
        let json = r#"{
            "region": "North",
            "soilType": "Loam",
            "rainfall": "650.5",
            "temperature": 24,
            "fertilizerUsed": true,
            "irrigationUsed": "False",
            "weatherCondition": "Sunny",
            "daysToHarvest": "120"
        }"#;
        let request: RecommendationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.soil_type.as_deref(), Some("Loam"));
        assert_eq!(request.rainfall, Some(650.5));
        assert_eq!(request.temperature, Some(24.0));
        assert_eq!(request.fertilizer_used.as_deref(), Some("true"));
        assert_eq!(request.irrigation_used.as_deref(), Some("False"));
        assert_eq!(request.desired_harvest_days(), 120);
    }

    #[test]
    fn test_non_numeric_text_decodes_as_nan() {
        let json = r#"{"rainfall": "abc", "temperature": " ", "daysToHarvest": "soon"}"#;
        let request: RecommendationRequest = serde_json::from_str(json).unwrap();

        assert!(request.rainfall.is_some_and(f64::is_nan));
        assert_eq!(request.temperature, None);
        assert_eq!(request.desired_harvest_days(), DEFAULT_DAYS_TO_HARVEST);
    }

    #[test]
    fn test_missing_fields_are_none() {
        let request: RecommendationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, RecommendationRequest::default());
        assert_eq!(request.desired_harvest_days(), DEFAULT_DAYS_TO_HARVEST);
    }

    #[test]
    fn test_build_features_missing_numbers_are_zero() {
        let encoders = LabelEncoders::new(
            vec!["Eastern".into(), "Northern".into()],
            vec!["Clay".into(), "Loamy".into()],
            vec!["Rainy".into(), "Sunny".into()],
        )
        .unwrap();
        let request = RecommendationRequest {
            region: Some("North".into()),
            soil_type: Some("Loam".into()),
            weather_condition: Some("Sunny".into()),
            fertilizer_used: Some("TRUE".into()),
            ..Default::default()
        };

        let (features, field) = build_features(&encoders, &request);
        assert_eq!(features.as_array(), [1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0]);
        assert!(field.fertilizer_used);
        assert!(!field.irrigation_used);
    }
}
