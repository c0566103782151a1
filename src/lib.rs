//! Crop Recommender Rust Implementation
//!
//! Recommendation decision engine combining pre-trained tree-ensemble models
//! with benchmarks mined from a historical farm-record corpus.
//!
//! Module layout:
//! - `data/`: Historical corpus loading with Polars
//! - `insights/`: Per-crop statistical benchmarks (optimal bands, yield/harvest extremes)
//! - `encoding/`: Alias normalization and label encoding of categorical inputs
//! - `models/`: Classifier/regressor seams and the JSON forest artifacts
//! - `orchestrator`: Candidate ranking over one feature vector
//! - `explanation/`: Composition of explained recommendation records
//! - `fallback`: Canned recommendations used whenever the pipeline degrades
//! - `engine`: The `recommend` entry point tying the stages together

pub mod utils;
pub mod error;
pub mod config;
pub mod data;
pub mod insights;
pub mod encoding;
pub mod features;
pub mod models;
pub mod orchestrator;
pub mod catalog;
pub mod explanation;
pub mod fallback;
pub mod context;
pub mod engine;

// Re-export commonly used types
pub use config::EngineConfig;
pub use context::EngineContext;
pub use data::{HistoricalCorpus, HistoricalRecord};
pub use engine::{recommend, recommend_on, try_recommend, RecommendationRequest};
pub use error::{CompositionError, CorpusLoadError, EngineError, ModelLoadError, PredictionError};
pub use explanation::RecommendationCandidate;
pub use features::FeatureVector;
pub use insights::{CropInsight, InsightTable};
