//! Descriptive Statistics
//!
//! Small numeric helpers shared by the insight extractor: order-statistic
//! quantiles with linear interpolation, means, extremes and the
//! round-half-to-even rounding applied to published benchmarks.

/// Quantile using linear interpolation between order statistics
///
/// Algorithm:
/// 1. Sort values ascending
/// 2. Position h = q × (n - 1)
/// 3. Result = x[floor(h)] + (h - floor(h)) × (x[ceil(h)] - x[floor(h)])
///
/// `q` is clamped into [0, 1]. Returns `None` for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Minimum and maximum in one pass, `None` for an empty slice
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(values.iter().fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}

/// Percentage of `true` flags (0-100), 0 for an empty slice
pub fn rate_percent(flags: &[bool]) -> f64 {
    if flags.is_empty() {
        return 0.0;
    }
    let hits = flags.iter().filter(|&&f| f).count();
    hits as f64 / flags.len() as f64 * 100.0
}

/// Round to `decimals` places, ties to even
///
/// Monotone: a <= b implies round_to(a) <= round_to(b), so rounded ranges
/// keep min <= max.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
