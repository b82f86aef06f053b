//! Confusion matrix over LOS bins and the classification scores derived from it.

use serde::{Deserialize, Serialize};

use crate::bins::{LosBin, BIN_COUNT};

/// Counts of (actual bin, predicted bin) pairs. Rows are actual bins,
/// columns predicted bins, both in rank order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinConfusion {
    counts: [[usize; BIN_COUNT]; BIN_COUNT],
}

/// Per-bin classification scores. A ratio with an empty denominator is
/// `None` rather than zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1: Option<f64>,
    /// Records whose actual stay falls in the bin
    pub support: usize,
}

fn ratio(num: usize, den: usize) -> Option<f64> {
    if den == 0 {
        None
    } else {
        Some(num as f64 / den as f64)
    }
}

fn mean_defined(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, n) = values
        .flatten()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

impl BinConfusion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from two aligned label sequences; extra elements of the
    /// longer one are ignored.
    pub fn from_bins(actual: &[LosBin], predicted: &[LosBin]) -> Self {
        let mut m = Self::new();
        for (&a, &p) in actual.iter().zip(predicted.iter()) {
            m.record(a, p);
        }
        m
    }

    pub fn record(&mut self, actual: LosBin, predicted: LosBin) {
        self.counts[actual.rank()][predicted.rank()] += 1;
    }

    pub fn count(&self, actual: LosBin, predicted: LosBin) -> usize {
        self.counts[actual.rank()][predicted.rank()]
    }

    /// Row-major counts, rows = actual bins
    pub fn as_rows(&self) -> [[usize; BIN_COUNT]; BIN_COUNT] {
        self.counts
    }

    pub fn actual_total(&self, bin: LosBin) -> usize {
        self.counts[bin.rank()].iter().sum()
    }

    pub fn predicted_total(&self, bin: LosBin) -> usize {
        self.counts.iter().map(|row| row[bin.rank()]).sum()
    }

    pub fn correct(&self, bin: LosBin) -> usize {
        self.counts[bin.rank()][bin.rank()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn total_correct(&self) -> usize {
        LosBin::ALL.iter().map(|&b| self.correct(b)).sum()
    }

    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.total_correct(), self.total())
    }

    pub fn precision(&self, bin: LosBin) -> Option<f64> {
        ratio(self.correct(bin), self.predicted_total(bin))
    }

    pub fn recall(&self, bin: LosBin) -> Option<f64> {
        ratio(self.correct(bin), self.actual_total(bin))
    }

    /// Harmonic mean of precision and recall. A missing side counts as zero
    /// as long as the other side is defined.
    pub fn f1(&self, bin: LosBin) -> Option<f64> {
        let (p, r) = (self.precision(bin), self.recall(bin));
        if p.is_none() && r.is_none() {
            return None;
        }
        let (p, r) = (p.unwrap_or(0.0), r.unwrap_or(0.0));
        if p + r == 0.0 {
            Some(0.0)
        } else {
            Some(2.0 * p * r / (p + r))
        }
    }

    pub fn class_scores(&self, bin: LosBin) -> ClassScores {
        ClassScores {
            precision: self.precision(bin),
            recall: self.recall(bin),
            f1: self.f1(bin),
            support: self.actual_total(bin),
        }
    }

    /// Mean recall over bins that have at least one actual record.
    pub fn balanced_accuracy(&self) -> Option<f64> {
        mean_defined(LosBin::ALL.iter().map(|&b| self.recall(b)))
    }

    /// Unweighted mean of the defined per-bin F1 scores.
    pub fn macro_f1(&self) -> Option<f64> {
        mean_defined(LosBin::ALL.iter().map(|&b| self.f1(b)))
    }

    /// Share of all records whose actual stay falls in `bin`.
    pub fn actual_share(&self, bin: LosBin) -> Option<f64> {
        ratio(self.actual_total(bin), self.total())
    }

    /// Share of all records predicted into `bin`.
    pub fn predicted_share(&self, bin: LosBin) -> Option<f64> {
        ratio(self.predicted_total(bin), self.total())
    }
}
