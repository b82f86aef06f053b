//! Regression error metrics over paired observed/predicted series.
//!
//! The free functions mirror the usual scikit-learn definitions and return
//! `f64::NAN` when the series are empty or misaligned.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{mean, median, percentile};

fn aligned(actual: &[f64], predicted: &[f64]) -> bool {
    !actual.is_empty() && actual.len() == predicted.len()
}

/// Element-wise `|actual - predicted|`, truncated to the shorter series.
pub fn abs_errors(actual: &[f64], predicted: &[f64]) -> Vec<f64> {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .collect()
}

/// Mean absolute error
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if !aligned(actual, predicted) {
        return f64::NAN;
    }
    mean(&abs_errors(actual, predicted))
}

/// Largest magnitude in `xs`, 0.0 when empty.
fn max_abs(xs: &[f64]) -> f64 {
    xs.iter().fold(0.0, |m, x| m.max(x.abs()))
}

/// `Σ (x / scale)²`. Dividing first keeps squares of large values finite.
fn scaled_sum_sq(xs: &[f64], scale: f64) -> f64 {
    xs.iter().map(|x| (x / scale).powi(2)).sum()
}

fn residuals(actual: &[f64], predicted: &[f64]) -> Vec<f64> {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| a - p)
        .collect()
}

/// Root mean squared error
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    if !aligned(actual, predicted) {
        return f64::NAN;
    }
    let res = residuals(actual, predicted);
    let scale = max_abs(&res);
    if scale == 0.0 {
        return 0.0;
    }
    scale * (scaled_sum_sq(&res, scale) / res.len() as f64).sqrt()
}

/// Coefficient of determination.
///
/// A constant `actual` series has no variance to explain: the score is 1.0
/// when predictions match it exactly and 0.0 otherwise. Both sums of squares
/// share one scale, so their ratio stays finite for very large values.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if !aligned(actual, predicted) {
        return f64::NAN;
    }
    let m = mean(actual);
    let dev: Vec<f64> = actual.iter().map(|a| a - m).collect();
    let res = residuals(actual, predicted);
    let scale = max_abs(&dev).max(max_abs(&res));
    if scale == 0.0 {
        return 1.0;
    }
    let ss_tot = scaled_sum_sq(&dev, scale);
    let ss_res = scaled_sum_sq(&res, scale);
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

pub fn median_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    if !aligned(actual, predicted) {
        return f64::NAN;
    }
    median(abs_errors(actual, predicted))
}

/// Absolute error at percentile `q` (0..=100)
pub fn percentile_absolute_error(actual: &[f64], predicted: &[f64], q: f64) -> f64 {
    if !aligned(actual, predicted) {
        return f64::NAN;
    }
    percentile(abs_errors(actual, predicted), q)
}

/// Global accuracy of a continuous predictor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegressionMetrics {
    pub mae: f64,
    pub rmse: f64,
    pub r2: f64,
}

impl RegressionMetrics {
    /// Returns `None` for empty or misaligned series.
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Option<Self> {
        if !aligned(actual, predicted) {
            return None;
        }
        Some(Self {
            mae: mae(actual, predicted),
            rmse: rmse(actual, predicted),
            r2: r_squared(actual, predicted),
        })
    }
}

/// Spread of absolute errors within one group of observations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorSummary {
    pub mae: f64,
    pub median_ae: f64,
    pub p90_ae: f64,
}

impl ErrorSummary {
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Option<Self> {
        if !aligned(actual, predicted) {
            return None;
        }
        let errs = abs_errors(actual, predicted);
        Some(Self {
            mae: mean(&errs),
            median_ae: median(errs.clone()),
            p90_ae: percentile(errs, 90.0),
        })
    }
}
