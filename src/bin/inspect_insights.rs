// Print the per-crop insight table mined from the historical corpus
//
// Usage: inspect_insights [corpus.csv]
// Defaults to CROP_CORPUS_PATH (or $CROP_DATA_DIR/crop_yield.csv).

use anyhow::{Context, Result};
use crop_recommender_rust::{EngineConfig, HistoricalCorpus, InsightTable};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_recommender_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let corpus_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| EngineConfig::from_env().corpus_path);

    let start = Instant::now();
    let corpus = HistoricalCorpus::load(&corpus_path)
        .with_context(|| format!("Failed to load corpus {}", corpus_path.display()))?;
    let insights = InsightTable::from_corpus(&corpus);
    tracing::info!("Analyzed {} records in {:?}", corpus.len(), start.elapsed());

    println!("\n=== DATA-DRIVEN CROP INSIGHTS ===");

    for (crop, data) in insights.sorted() {
        println!("\n{}:", crop.to_uppercase());
        println!("  Yield Analysis:");
        println!("    Average Yield: {} tons/ha", data.avg_yield);
        println!("    Yield Range: {} - {} tons/ha", data.min_yield, data.max_yield);
        println!(
            "  Optimal Rainfall: {}-{}mm",
            data.optimal_rainfall_min, data.optimal_rainfall_max
        );
        println!(
            "  Optimal Temperature: {}-{}°C",
            data.optimal_temp_min, data.optimal_temp_max
        );
        println!(
            "  Harvest Time: {}-{} days (avg: {})",
            data.min_harvest_days, data.max_harvest_days, data.avg_harvest_days
        );
        println!("  Best Weather: {}", data.best_weather);
        println!("  Best Soil: {}", data.best_soil);
        println!("  Best Region: {}", data.best_region);
        println!("  Fertilizer Usage: {}% of farms", data.fertilizer_usage_rate);
        println!("  Irrigation Usage: {}% of farms", data.irrigation_usage_rate);
        println!(
            "  Data: {} total samples, {} high-yield samples",
            data.total_samples, data.high_yield_sample_count
        );
    }

    println!("\nAnalysis complete: insights for {} crops.", insights.len());
    println!("Ranges are based on the top 25% performing farms in the dataset.");
    Ok(())
}
