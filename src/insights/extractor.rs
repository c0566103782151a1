//! Insight Extraction
//!
//! Groups the corpus by lower-cased crop name and derives one [`CropInsight`]
//! per group.
//!
//! Per group:
//! 1. Yield Q75 (linear interpolation) is the high-performer threshold
//! 2. High-yield subset = records with yield >= Q75
//! 3. Optimal band = 25th-75th percentile of the subset's rainfall and temperature
//! 4. Whole-group average/min/max yield and harvest days
//! 5. Fertilizer/irrigation usage rates (% of records)
//! 6. Best weather/soil/region = category with the highest mean yield
//!
//! Category ties go to the value encountered first in corpus order.
//!
//! Groups are independent, so they are processed on the rayon pool; the
//! result is keyed by crop and does not depend on scheduling.

use super::CropInsight;
use crate::data::HistoricalRecord;
use crate::utils::{mean, min_max, quantile, rate_percent, round_to};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Yield percentile separating high performers from the rest
pub const HIGH_YIELD_QUANTILE: f64 = 0.75;

/// Lower/upper percentiles of the optimal band
pub const BAND_LOWER_QUANTILE: f64 = 0.25;
pub const BAND_UPPER_QUANTILE: f64 = 0.75;

/// Mine insights for every crop in the corpus
pub fn extract_insights(records: &[HistoricalRecord]) -> FxHashMap<String, CropInsight> {
    let mut groups: FxHashMap<String, Vec<&HistoricalRecord>> = FxHashMap::default();
    for record in records {
        groups
            .entry(record.crop.to_lowercase())
            .or_default()
            .push(record);
    }

    let insights: FxHashMap<String, CropInsight> = groups
        .into_par_iter()
        .filter_map(|(crop, group)| extract_crop_insight(&group).map(|insight| (crop, insight)))
        .collect();

    tracing::info!("Analyzed {} historical records into {} crop insights", records.len(), insights.len());
    insights
}

/// Derive the insight for one crop group, `None` only for an empty group
pub fn extract_crop_insight(group: &[&HistoricalRecord]) -> Option<CropInsight> {
    let yields: Vec<f64> = group.iter().map(|r| r.yield_tons_per_ha).collect();
    let harvest_days: Vec<f64> = group.iter().map(|r| r.days_to_harvest).collect();

    // STEP 1-2: High-yield subset
    let threshold = quantile(&yields, HIGH_YIELD_QUANTILE)?;
    let high_yield: Vec<&HistoricalRecord> = group
        .iter()
        .copied()
        .filter(|r| r.yield_tons_per_ha >= threshold)
        .collect();

    // Interpolation rounding can push the threshold a hair above the maximum;
    // the whole group then stands in for the subset.
    let band_source: &[&HistoricalRecord] = if high_yield.is_empty() {
        group
    } else {
        &high_yield
    };

    // STEP 3: Optimal band
    let band_rainfall: Vec<f64> = band_source.iter().map(|r| r.rainfall_mm).collect();
    let band_temperature: Vec<f64> = band_source.iter().map(|r| r.temperature_c).collect();

    let rainfall_min = quantile(&band_rainfall, BAND_LOWER_QUANTILE)?;
    let rainfall_max = quantile(&band_rainfall, BAND_UPPER_QUANTILE)?;
    let temp_min = quantile(&band_temperature, BAND_LOWER_QUANTILE)?;
    let temp_max = quantile(&band_temperature, BAND_UPPER_QUANTILE)?;

    // STEP 4: Whole-group extremes
    let (min_yield, max_yield) = min_max(&yields)?;
    let (min_days, max_days) = min_max(&harvest_days)?;

    // STEP 5: Usage rates
    let fertilizer: Vec<bool> = group.iter().map(|r| r.fertilizer_used).collect();
    let irrigation: Vec<bool> = group.iter().map(|r| r.irrigation_used).collect();

    Some(CropInsight {
        optimal_rainfall_min: round_to(rainfall_min, 0),
        optimal_rainfall_max: round_to(rainfall_max, 0),
        optimal_temp_min: round_to(temp_min, 1),
        optimal_temp_max: round_to(temp_max, 1),
        avg_yield: round_to(mean(&yields)?, 1),
        min_yield: round_to(min_yield, 1),
        max_yield: round_to(max_yield, 1),
        avg_harvest_days: round_to(mean(&harvest_days)?, 0),
        min_harvest_days: round_to(min_days, 0),
        max_harvest_days: round_to(max_days, 0),
        fertilizer_usage_rate: round_to(rate_percent(&fertilizer), 1),
        irrigation_usage_rate: round_to(rate_percent(&irrigation), 1),
        // STEP 6: Best categories
        best_weather: best_category(group, |r| r.weather_condition.as_str()),
        best_soil: best_category(group, |r| r.soil_type.as_str()),
        best_region: best_category(group, |r| r.region.as_str()),
        total_samples: group.len(),
        high_yield_sample_count: high_yield.len(),
    })
}

/// Category with the highest mean yield; ties go to the first-seen value
fn best_category<'a, F>(group: &[&'a HistoricalRecord], key: F) -> String
where
    F: Fn(&'a HistoricalRecord) -> &'a str,
{
    let mut first_seen: Vec<&'a str> = Vec::new();
    let mut totals: FxHashMap<&'a str, (f64, usize)> = FxHashMap::default();

    for &record in group {
        let category = key(record);
        let entry = totals.entry(category).or_insert_with(|| {
            first_seen.push(category);
            (0.0, 0)
        });
        entry.0 += record.yield_tons_per_ha;
        entry.1 += 1;
    }

    let mut best: Option<(&str, f64)> = None;
    for category in first_seen {
        let Some(&(sum, count)) = totals.get(category) else {
            continue;
        };
        let category_mean = sum / count as f64;
        // Strict comparison keeps the earlier category on ties
        if best.map_or(true, |(_, best_mean)| category_mean > best_mean) {
            best = Some((category, category_mean));
        }
    }

    best.map(|(category, _)| category.to_string()).unwrap_or_default()
}
