//! Historical Corpus Insights
//!
//! Per-crop statistical benchmarks mined once from the historical corpus:
//! optimal rainfall/temperature bands taken from top-quartile performers,
//! whole-group yield and harvest extremes, input usage rates, and the best
//! performing weather/soil/region.
//!
//! ## Architecture
//! - `extractor.rs` - Grouping and per-crop statistics
//! - `benchmarks.rs` - Lookup views with the defaults used for unknown crops

pub mod extractor;
pub mod benchmarks;

use crate::data::HistoricalCorpus;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub use benchmarks::{
    format_rainfall_range, format_temperature_range, FarmingPractice, OptimalConditions,
    YieldBenchmark,
};
pub use extractor::{extract_crop_insight, extract_insights};

/// Benchmarks for one crop
///
/// Invariant: every min is <= its max.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropInsight {
    /// Rainfall band (mm) of high-yield records, 25th-75th percentile
    pub optimal_rainfall_min: f64,
    pub optimal_rainfall_max: f64,

    /// Temperature band (°C) of high-yield records, 25th-75th percentile
    pub optimal_temp_min: f64,
    pub optimal_temp_max: f64,

    // Whole-group yield (t/ha)
    pub avg_yield: f64,
    pub min_yield: f64,
    pub max_yield: f64,

    // Whole-group harvest duration (days)
    pub avg_harvest_days: f64,
    pub min_harvest_days: f64,
    pub max_harvest_days: f64,

    /// Share of records using fertilizer (0-100)
    pub fertilizer_usage_rate: f64,
    /// Share of records using irrigation (0-100)
    pub irrigation_usage_rate: f64,

    pub best_weather: String,
    pub best_soil: String,
    pub best_region: String,

    pub total_samples: usize,
    pub high_yield_sample_count: usize,
}

/// Read-only table of insights keyed by lower-cased crop name
#[derive(Debug, Clone, Default)]
pub struct InsightTable {
    insights: FxHashMap<String, CropInsight>,
}

impl InsightTable {
    /// Table with no crops; every lookup falls back to defaults
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mine the corpus
    pub fn from_corpus(corpus: &HistoricalCorpus) -> Self {
        Self {
            insights: extract_insights(corpus.records()),
        }
    }

    /// Build from precomputed insights; keys are lower-cased
    pub fn from_insights<I>(insights: I) -> Self
    where
        I: IntoIterator<Item = (String, CropInsight)>,
    {
        Self {
            insights: insights
                .into_iter()
                .map(|(crop, insight)| (crop.to_lowercase(), insight))
                .collect(),
        }
    }

    /// Case-insensitive lookup
    pub fn get(&self, crop: &str) -> Option<&CropInsight> {
        self.insights.get(&crop.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.insights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }

    /// Insights sorted by crop key, for stable reporting
    pub fn sorted(&self) -> Vec<(&str, &CropInsight)> {
        let mut entries: Vec<(&str, &CropInsight)> = self
            .insights
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
