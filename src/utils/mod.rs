//! Utility modules shared across the pipeline
//!
//! - Statistics: quantiles, means, usage rates, benchmark rounding
//! - Text: display-name formatting

pub mod statistics;
pub mod text;

// Re-export commonly used helpers
pub use statistics::{mean, min_max, quantile, rate_percent, round_to};
pub use text::title_case;
