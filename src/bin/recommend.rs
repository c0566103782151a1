// Recommendation CLI
//
// Usage:
//   recommend '{"region": "North", "soilType": "Loam", "rainfall": 650, ...}'
//   recommend <region> <soil_type> <rainfall> <temperature> <fertilizer_used> \
//             <irrigation_used> <weather_condition> [days_to_harvest]
//
// Paths come from CROP_DATA_DIR / CROP_CORPUS_PATH / CROP_MODEL_DIR /
// CROP_CATALOG_PATH. Prints the recommendation list as pretty JSON.

use anyhow::{bail, Context, Result};
use crop_recommender_rust::{recommend, EngineConfig, EngineContext, RecommendationRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn parse_args(args: &[String]) -> Result<RecommendationRequest> {
    match args {
        [json] if json.trim_start().starts_with('{') => {
            serde_json::from_str(json).context("Failed to parse request JSON")
        }
        [region, soil, rainfall, temperature, fertilizer, irrigation, weather, rest @ ..]
            if rest.len() <= 1 =>
        {
            let number = |name: &str, raw: &str| -> Result<f64> {
                raw.parse::<f64>()
                    .with_context(|| format!("{} must be a number, got '{}'", name, raw))
            };
            Ok(RecommendationRequest {
                region: Some(region.clone()),
                soil_type: Some(soil.clone()),
                rainfall: Some(number("rainfall", rainfall.as_str())?),
                temperature: Some(number("temperature", temperature.as_str())?),
                fertilizer_used: Some(fertilizer.clone()),
                irrigation_used: Some(irrigation.clone()),
                weather_condition: Some(weather.clone()),
                days_to_harvest: rest
                    .first()
                    .map(|d| number("days_to_harvest", d.as_str()))
                    .transpose()?,
            })
        }
        _ => bail!(
            "usage: recommend '<request json>' | recommend <region> <soil_type> <rainfall> \
             <temperature> <fertilizer_used> <irrigation_used> <weather_condition> [days_to_harvest]"
        ),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_recommender_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let request = parse_args(&args)?;

    let config = EngineConfig::from_env();
    tracing::info!("Configuration:");
    tracing::info!("  corpus: {}", config.corpus_path.display());
    tracing::info!("  models: {}", config.model_dir.display());

    let ctx = EngineContext::initialize(&config);
    let recommendations = recommend(&ctx, &request);

    println!("{}", serde_json::to_string_pretty(&recommendations)?);
    Ok(())
}
