//! Explained Recommendation Records
//!
//! ## Architecture
//! - `types.rs` - Serialized output shape
//! - `composer.rs` - Predictions + benchmarks + catalog → ranked records
//! - `conditions.rs` - Optimal/Suboptimal classification and descriptors
//! - `harvest.rs` - Growth stage and harvest month

pub mod types;
pub mod conditions;
pub mod harvest;
pub mod composer;

pub use types::{
    DataInsights, ExpectedConditions, HarvestPrediction, RecommendationCandidate,
    SuitabilityFactors,
};

pub use composer::{compose, compose_candidate, FieldConditions};
pub use conditions::{practice_recommendation, weather_descriptor, ConditionStatus};
pub use harvest::{harvest_month, GrowthStage};
