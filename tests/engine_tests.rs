//! Recommendation Engine Integration Tests
//!
//! Drives `recommend_on` end to end over an in-memory context built from a
//! synthetic corpus and hand-built forests, plus stub models for the
//! failure paths.

mod common;

use common::*;
use crop_recommender_rust::catalog::CropCatalog;
use crop_recommender_rust::explanation::{ConditionStatus, GrowthStage};
use crop_recommender_rust::models::ModelBundle;
use crop_recommender_rust::orchestrator::MIN_CONFIDENCE_PCT;
use crop_recommender_rust::{
    recommend, recommend_on, try_recommend, EngineContext, EngineError, InsightTable,
    PredictionError, RecommendationRequest,
};

fn wet_request() -> RecommendationRequest {
    RecommendationRequest::new("South", "Clay", 650.0, 24.0, "true", "false", "Rainy", 120)
}

fn fallback_context() -> EngineContext {
    EngineContext::from_parts(InsightTable::from_corpus(&corpus()), None, CropCatalog::builtin())
}

#[test]
fn test_model_path_ranks_and_explains() {
    let ctx = context();
    let out = recommend_on(&ctx, &wet_request(), today());

    let names: Vec<_> = out.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Rice", "Maize", "Wheat"]);

    let scores: Vec<f64> = out.iter().map(|c| c.suitability_score).collect();
    assert_eq!(scores, vec![70.0, 18.0, 10.0]);

    let rice = &out[0];
    assert_eq!(rice.crop_type, "Grain");
    assert_eq!(rice.seed_required, "25-30 kg/ha");
    assert_eq!(rice.yield_display, "4.3 tons/ha");
    assert_eq!(rice.predicted_harvest_time, 118);
    assert_eq!(rice.expected_conditions.optimal_rainfall, "650.0-750.0mm");
    assert_eq!(rice.expected_conditions.optimal_temperature, "25.0-27.0°C");
    assert_eq!(rice.expected_conditions.best_weather, "Adequate rainfall during growing season");
    assert_eq!(rice.expected_conditions.recommended_fertilizer, "Yes");
    assert_eq!(rice.expected_conditions.recommended_irrigation, "Recommended");
    assert_eq!(rice.suitability_factors.rainfall, ConditionStatus::Optimal);
    assert_eq!(rice.suitability_factors.temperature, ConditionStatus::Suboptimal);
    assert_eq!(rice.harvest_prediction.growth_stage, GrowthStage::LongTerm);

    let insights = rice.data_insights.as_ref().unwrap();
    assert_eq!(insights.data_samples, "Based on 5 real farm records");
    assert_eq!(insights.high_yield_samples, 2);
}

#[test]
fn test_shared_predictions_across_candidates() {
    let out = recommend_on(&context(), &wet_request(), today());
    assert!(out.iter().all(|c| c.yield_display == "4.3 tons/ha"));
    assert!(out.iter().all(|c| c.predicted_harvest_time == 118));
}

#[test]
fn test_crop_without_insight_is_unknown() {
    let out = recommend_on(&context(), &wet_request(), today());
    let maize = out.iter().find(|c| c.name == "Maize").unwrap();
    assert_eq!(maize.suitability_factors.rainfall, ConditionStatus::Unknown);
    assert_eq!(maize.suitability_factors.temperature, ConditionStatus::Unknown);
    assert_eq!(maize.expected_conditions.optimal_rainfall, "100-200mm");
}

#[test]
fn test_single_record_crop_has_zero_width_band() {
    let out = recommend_on(&context(), &wet_request(), today());
    let wheat = out.iter().find(|c| c.name == "Wheat").unwrap();
    assert_eq!(wheat.expected_conditions.optimal_rainfall, "420.0-420.0mm");
    assert_eq!(wheat.suitability_factors.rainfall_optimal_range.as_deref(), Some("420.0-420.0mm"));
    assert_eq!(wheat.suitability_factors.rainfall, ConditionStatus::Suboptimal);
}

#[test]
fn test_scores_descending_and_above_floor() {
    for rainfall in [100.0, 300.0, 500.0, 501.0, 900.0] {
        let request = RecommendationRequest::new("East", "Loam", rainfall, 22.0, "false", "true", "Sunny", 90);
        let out = recommend_on(&context(), &request, today());

        assert!(!out.is_empty());
        assert!(out.iter().all(|c| c.suitability_score >= MIN_CONFIDENCE_PCT));
        for pair in out.windows(2) {
            assert!(pair[0].suitability_score > pair[1].suitability_score);
        }
    }
}

#[test]
fn test_unseen_region_still_recommends() {
    let request = RecommendationRequest::new("Atlantis", "Loam", 650.0, 24.0, "true", "true", "Sunny", 120);
    let out = try_recommend(&context(), &request, today()).unwrap();
    assert!(!out.is_empty());
    assert_eq!(out[0].name, "Rice");
}

#[test]
fn test_without_models_returns_fallback() {
    let ctx = fallback_context();
    assert!(ctx.is_fallback_only());

    let out = recommend_on(&ctx, &wet_request(), today());
    let names: Vec<_> = out.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Rice", "Corn"]);

    // 650 mm / 24 °C: outside both rainfall bands, inside both temperature bands
    assert_eq!(out[0].suitability_factors.rainfall, ConditionStatus::Suboptimal);
    assert_eq!(out[0].suitability_factors.temperature, ConditionStatus::Optimal);
    assert_eq!(out[1].suitability_factors.rainfall, ConditionStatus::Suboptimal);
    assert_eq!(out[1].suitability_factors.temperature, ConditionStatus::Optimal);

    assert_eq!(
        try_recommend(&ctx, &wet_request(), today()).unwrap_err(),
        EngineError::FallbackOnly
    );
}

#[test]
fn test_fallback_uses_defaults_for_missing_inputs() {
    let out = recommend_on(&fallback_context(), &RecommendationRequest::default(), today());
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].suitability_factors.rainfall, ConditionStatus::Optimal);
    assert_eq!(out[1].suitability_factors.rainfall, ConditionStatus::Suboptimal);
}

#[test]
fn test_all_below_floor_falls_back() {
    let classes: Vec<String> = (0..25).map(|i| format!("crop{:02}", i)).collect();
    let ctx = context_with(ModelBundle::new(
        FixedClassifier { classes, probabilities: vec![0.04; 25] },
        FixedRegressor(4.0),
        FixedRegressor(100.0),
        encoders(),
    ));

    assert_eq!(
        try_recommend(&ctx, &wet_request(), today()).unwrap_err(),
        EngineError::NoCandidates
    );
    let names: Vec<_> = recommend_on(&ctx, &wet_request(), today())
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Rice", "Corn"]);
}

#[test]
fn test_classifier_failure_falls_back() {
    let ctx = context_with(ModelBundle::new(
        FailingClassifier { classes: strings(&CLASSES) },
        FixedRegressor(4.0),
        FixedRegressor(100.0),
        encoders(),
    ));

    let err = try_recommend(&ctx, &wet_request(), today()).unwrap_err();
    assert!(matches!(err, EngineError::Prediction(PredictionError::Inference { .. })));
    assert_eq!(recommend_on(&ctx, &wet_request(), today()).len(), 2);
}

#[test]
fn test_probability_width_mismatch_falls_back() {
    let ctx = context_with(ModelBundle::new(
        FixedClassifier { classes: strings(&CLASSES), probabilities: vec![0.5, 0.5] },
        FixedRegressor(4.0),
        FixedRegressor(100.0),
        encoders(),
    ));

    assert_eq!(
        try_recommend(&ctx, &wet_request(), today()).unwrap_err(),
        EngineError::Prediction(PredictionError::ClassWidthMismatch { expected: 4, got: 2 })
    );
}

#[test]
fn test_non_finite_regression_falls_back() {
    let ctx = context_with(ModelBundle::new(
        classifier(),
        FixedRegressor(f64::NAN),
        FixedRegressor(100.0),
        encoders(),
    ));

    let err = try_recommend(&ctx, &wet_request(), today()).unwrap_err();
    assert!(matches!(err, EngineError::Prediction(PredictionError::NonFiniteOutput { .. })));
    assert_eq!(recommend_on(&ctx, &wet_request(), today())[0].name, "Rice");
}

#[test]
fn test_non_finite_rainfall_falls_back() {
    let request = RecommendationRequest {
        rainfall: Some(f64::INFINITY),
        ..wet_request()
    };
    let err = try_recommend(&context(), &request, today()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Prediction(PredictionError::NonFiniteFeature { name: "Rainfall_mm", .. })
    ));
}

#[test]
fn test_non_numeric_rainfall_serves_fallback() {
    let json = r#"{"region": "South", "soilType": "Clay", "rainfall": "lots",
        "temperature": 24, "fertilizerUsed": "true", "irrigationUsed": "false",
        "weatherCondition": "Rainy", "daysToHarvest": 120}"#;
    let request: RecommendationRequest = serde_json::from_str(json).unwrap();

    let err = try_recommend(&context(), &request, today()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Prediction(PredictionError::NonFiniteFeature { name: "Rainfall_mm", .. })
    ));

    let out = recommend_on(&context(), &request, today());
    let names: Vec<_> = out.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Rice", "Corn"]);
    // Rainfall falls back to the 200 mm default
    assert_eq!(out[0].suitability_factors.rainfall, ConditionStatus::Optimal);
}

#[test]
fn test_harvest_month_for_120_days() {
    let ctx = context_with(ModelBundle::new(
        classifier(),
        FixedRegressor(4.0),
        FixedRegressor(120.0),
        encoders(),
    ));
    let out = recommend_on(&ctx, &wet_request(), today());
    let expected = (today() + chrono::Days::new(120)).format("%B %Y").to_string();
    assert_eq!(expected, "February 2027");
    assert!(out.iter().all(|c| c.harvest_prediction.harvest_month == expected));
    assert!(out.iter().all(|c| c.harvest_prediction.growth_stage == GrowthStage::LongTerm));
}

#[test]
fn test_identical_requests_are_deterministic() {
    let ctx = context();
    let first = recommend_on(&ctx, &wet_request(), today());
    for _ in 0..5 {
        assert_eq!(recommend_on(&ctx, &wet_request(), today()), first);
    }
}

#[test]
fn test_recommend_uses_current_date() {
    let out = recommend(&context(), &wet_request());
    let expected = (chrono::Local::now().date_naive() + chrono::Days::new(118))
        .format("%B %Y")
        .to_string();
    assert_eq!(out[0].harvest_prediction.harvest_month, expected);
}

#[test]
fn test_output_json_shape() {
    let out = recommend_on(&context(), &wet_request(), today());
    let json = serde_json::to_value(&out[0]).unwrap();

    assert_eq!(json["name"], "Rice");
    assert_eq!(json["type"], "Grain");
    assert_eq!(json["suitabilityScore"], 70.0);
    assert_eq!(json["yield"], "4.3 tons/ha");
    assert_eq!(json["seedRequired"], "25-30 kg/ha");
    assert_eq!(json["fertilizerNeeded"], "NPK 14-14-14");
    assert_eq!(json["predicted_harvest_time"], 118);
    assert_eq!(json["expected_conditions"]["optimal_rainfall"], "650.0-750.0mm");
    assert_eq!(json["suitability_factors"]["rainfall"], "Optimal");
    assert_eq!(json["harvest_prediction"]["growth_stage"], "Long-term crop");
    assert_eq!(json["data_insights"]["harvest_range"], "100-130 days");
}
