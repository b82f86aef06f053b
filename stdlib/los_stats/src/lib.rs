//! Basic statistics for length-of-stay evaluation.
//!
//! Functions that reduce a series follow one convention: an empty input
//! yields `f64::NAN` instead of panicking, so callers decide how to report
//! a missing value.
mod regression;

pub use regression::*;

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// 50th percentile, see [`percentile`].
pub fn median(xs: Vec<f64>) -> f64 {
    percentile(xs, 50.0)
}

/// Percentile `q` (0..=100) with linear interpolation between closest ranks.
///
/// `q` is clamped into range. For a single value every percentile is that value.
pub fn percentile(mut xs: Vec<f64>, q: f64) -> f64 {
    if xs.is_empty() || q.is_nan() {
        return f64::NAN;
    }
    xs.sort_by(|a, b| a.total_cmp(b));
    let q = q.clamp(0.0, 100.0);
    let pos = (q / 100.0) * (xs.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return xs[lo];
    }
    let frac = pos - lo as f64;
    xs[lo] + (xs[hi] - xs[lo]) * frac
}
