//! Recency-weighted cycle length forecast.
//!
//! The most recent completed cycle has weight 1 and every step further back
//! multiplies the weight by `decay`, so influence fades geometrically without
//! a hard cutoff inside the window.

use crate::analytics::intervals::{recent_lengths, CycleInterval};

/// Forecasts the next cycle length from the last `window` intervals.
///
/// Returns `None` when there is no completed interval (or `window == 0`);
/// callers apply their configured default length.
pub fn forecast_length(intervals: &[CycleInterval], window: usize, decay: f64) -> Option<f64> {
    let recent = recent_lengths(intervals, window);
    if recent.is_empty() {
        return None;
    }

    let weights = decay_weights(recent.len(), decay);
    let total_weight: f64 = weights.iter().sum();
    let weighted_sum: f64 = weights
        .iter()
        .zip(&recent)
        .map(|(weight, length)| weight * *length as f64)
        .sum();

    Some(weighted_sum / total_weight)
}

/// Weights for `n` samples ordered oldest first: `decay^(n - 1 - i)`.
pub fn decay_weights(n: usize, decay: f64) -> Vec<f64> {
    (0..n).map(|i| decay.powi((n - 1 - i) as i32)).collect()
}
