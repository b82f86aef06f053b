//! Bin-wise bias evaluation of a length-of-stay regressor.
//!
//! A regressor can score well globally while systematically pulling short
//! stays up or long stays down. [`evaluate`] reports the global regression
//! error next to how often each clinical bin is recovered from the
//! continuous prediction.

use std::fmt;

use log::debug;
use los_stats::{ErrorSummary, RegressionMetrics};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::bins::{LosBin, BIN_COUNT};
use crate::confusion::{BinConfusion, ClassScores};
use crate::error::{EvalError, Series};
use crate::record::{unzip_pairs, PredictionPair};

const NO_DATA: &str = "no data";

/// Longest stay, in days, accepted as input (one hundred years).
pub const MAX_LOS_DAYS: f64 = 36_500.0;

/// Categorical accuracy of one bin.
///
/// `NoData` marks a bin with no held-out records and is distinct from a
/// measured 0.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinAccuracy {
    NoData,
    Measured(f64),
}

impl BinAccuracy {
    fn from_counts(correct: usize, total: usize) -> Self {
        if total == 0 {
            BinAccuracy::NoData
        } else {
            BinAccuracy::Measured(correct as f64 / total as f64)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            BinAccuracy::NoData => None,
            BinAccuracy::Measured(v) => Some(v),
        }
    }

    pub fn is_no_data(self) -> bool {
        matches!(self, BinAccuracy::NoData)
    }
}

impl fmt::Display for BinAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinAccuracy::NoData => f.write_str(NO_DATA),
            BinAccuracy::Measured(v) => write!(f, "{:.1}%", v * 100.0),
        }
    }
}

impl Serialize for BinAccuracy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BinAccuracy::NoData => serializer.serialize_str(NO_DATA),
            BinAccuracy::Measured(v) => serializer.serialize_f64(*v),
        }
    }
}

struct BinAccuracyVisitor;

impl<'de> Visitor<'de> for BinAccuracyVisitor {
    type Value = BinAccuracy;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a number or the string \"{NO_DATA}\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(BinAccuracy::Measured(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(BinAccuracy::Measured(v as f64))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(BinAccuracy::Measured(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v == NO_DATA {
            Ok(BinAccuracy::NoData)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for BinAccuracy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BinAccuracyVisitor)
    }
}

/// Breakdown for one LOS bin. Counts are keyed by the actual stay unless
/// stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinStats {
    pub bin: LosBin,
    pub actual_count: usize,
    pub predicted_count: usize,
    pub correct: usize,
    pub accuracy: BinAccuracy,
    /// Absolute-error spread over records whose actual stay is in this bin
    pub errors: Option<ErrorSummary>,
}

/// Result of one evaluation run over a held-out set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinEvaluation {
    pub n: usize,
    pub regression: RegressionMetrics,
    pub bins: [BinStats; BIN_COUNT],
    pub categorical_accuracy: f64,
    pub confusion: BinConfusion,
}

impl BinEvaluation {
    pub fn bin(&self, bin: LosBin) -> &BinStats {
        &self.bins[bin.rank()]
    }

    pub fn accuracy(&self, bin: LosBin) -> BinAccuracy {
        self.bin(bin).accuracy
    }

    pub fn total_correct(&self) -> usize {
        self.bins.iter().map(|b| b.correct).sum()
    }

    pub fn class_scores(&self, bin: LosBin) -> ClassScores {
        self.confusion.class_scores(bin)
    }

    pub fn balanced_accuracy(&self) -> Option<f64> {
        self.confusion.balanced_accuracy()
    }

    pub fn macro_f1(&self) -> Option<f64> {
        self.confusion.macro_f1()
    }
}

fn validate(series: Series, values: &[f64]) -> Result<(), EvalError> {
    match values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0 || **v > MAX_LOS_DAYS)
    {
        Some((index, &value)) => Err(EvalError::InvalidValue {
            series,
            index,
            value,
        }),
        None => Ok(()),
    }
}

/// Evaluate aligned actual/predicted stays.
///
/// Index `i` of both slices must refer to the same record. Fails on length
/// mismatch, empty input, or any value that is negative, non-finite or
/// above [`MAX_LOS_DAYS`].
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Result<BinEvaluation, EvalError> {
    if actual.len() != predicted.len() {
        return Err(EvalError::InputShape {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(EvalError::EmptyInput);
    }
    validate(Series::Actual, actual)?;
    validate(Series::Predicted, predicted)?;

    let n = actual.len();
    let regression = RegressionMetrics::compute(actual, predicted).ok_or(EvalError::EmptyInput)?;

    let actual_bins = crate::bins::bin_all(actual);
    let predicted_bins = crate::bins::bin_all(predicted);
    let confusion = BinConfusion::from_bins(&actual_bins, &predicted_bins);

    let bins = LosBin::ALL.map(|bin| {
        let (bin_actual, bin_predicted): (Vec<f64>, Vec<f64>) = actual
            .iter()
            .zip(predicted.iter())
            .zip(actual_bins.iter())
            .filter(|(_, b)| **b == bin)
            .map(|((&a, &p), _)| (a, p))
            .unzip();
        let actual_count = confusion.actual_total(bin);
        let correct = confusion.correct(bin);
        if actual_count == 0 {
            debug!("no held-out records in the {} bin", bin.name());
        }
        BinStats {
            bin,
            actual_count,
            predicted_count: confusion.predicted_total(bin),
            correct,
            accuracy: BinAccuracy::from_counts(correct, actual_count),
            errors: ErrorSummary::compute(&bin_actual, &bin_predicted),
        }
    });

    let categorical_accuracy = confusion.total_correct() as f64 / n as f64;
    debug!(
        "evaluated {n} pairs: mae={:.3} rmse={:.3} r2={:.3} binned_accuracy={:.3}",
        regression.mae, regression.rmse, regression.r2, categorical_accuracy
    );

    Ok(BinEvaluation {
        n,
        regression,
        bins,
        categorical_accuracy,
        confusion,
    })
}

pub fn evaluate_pairs(pairs: &[PredictionPair]) -> Result<BinEvaluation, EvalError> {
    let (actual, predicted) = unzip_pairs(pairs);
    evaluate(&actual, &predicted)
}
