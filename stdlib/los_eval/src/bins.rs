//! Clinical length-of-stay bins.
//!
//! Stays are split into three ordered ranges used for bed planning:
//! short (up to a week), medium (second week) and long (beyond two weeks).
//! Upper bounds are inclusive, so a stay of exactly 7.0 days is short and
//! exactly 14.0 days is medium.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inclusive upper bound of the short-stay bin, in days.
pub const SHORT_MAX_DAYS: f64 = 7.0;
/// Inclusive upper bound of the medium-stay bin, in days.
pub const MEDIUM_MAX_DAYS: f64 = 14.0;

/// Number of LOS bins.
pub const BIN_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LosBin {
    #[serde(rename = "≤7 days")]
    Short,
    #[serde(rename = "8–14 days")]
    Medium,
    #[serde(rename = ">14 days")]
    Long,
}

impl LosBin {
    /// All bins in rank order.
    pub const ALL: [LosBin; BIN_COUNT] = [LosBin::Short, LosBin::Medium, LosBin::Long];

    /// Map a stay length in days to its bin.
    ///
    /// Total and non-decreasing in `days`. Negative lengths are not
    /// meaningful stays but still land in `Short`; NaN lands in `Long`
    /// because it fails both upper-bound comparisons. Validate upstream
    /// when that matters (see [`crate::evaluate`]).
    pub fn classify(days: f64) -> LosBin {
        if days <= SHORT_MAX_DAYS {
            LosBin::Short
        } else if days <= MEDIUM_MAX_DAYS {
            LosBin::Medium
        } else {
            LosBin::Long
        }
    }

    /// Position in [`LosBin::ALL`]; also usable as an array index.
    pub fn rank(self) -> usize {
        match self {
            LosBin::Short => 0,
            LosBin::Medium => 1,
            LosBin::Long => 2,
        }
    }

    pub fn from_rank(rank: usize) -> Option<LosBin> {
        LosBin::ALL.get(rank).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            LosBin::Short => "≤7 days",
            LosBin::Medium => "8–14 days",
            LosBin::Long => ">14 days",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LosBin::Short => "short",
            LosBin::Medium => "medium",
            LosBin::Long => "long",
        }
    }

    /// `(exclusive lower, inclusive upper)` bounds in days. `Short` has no
    /// lower bound and `Long` no upper bound.
    pub fn day_range(self) -> (Option<f64>, Option<f64>) {
        match self {
            LosBin::Short => (None, Some(SHORT_MAX_DAYS)),
            LosBin::Medium => (Some(SHORT_MAX_DAYS), Some(MEDIUM_MAX_DAYS)),
            LosBin::Long => (Some(MEDIUM_MAX_DAYS), None),
        }
    }

    /// Whether `days` falls inside this bin.
    pub fn contains(self, days: f64) -> bool {
        LosBin::classify(days) == self
    }
}

impl fmt::Display for LosBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shorthand for [`LosBin::classify`].
pub fn bin_of(days: f64) -> LosBin {
    LosBin::classify(days)
}

pub fn bin_all(days: &[f64]) -> Vec<LosBin> {
    days.iter().map(|&d| LosBin::classify(d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(bin_of(0.0), LosBin::Short);
        assert_eq!(bin_of(7.0), LosBin::Short);
        assert_eq!(bin_of(7.0001), LosBin::Medium);
        assert_eq!(bin_of(8.0), LosBin::Medium);
        assert_eq!(bin_of(14.0), LosBin::Medium);
        assert_eq!(bin_of(14.0001), LosBin::Long);
        assert_eq!(bin_of(365.0), LosBin::Long);
    }

    #[test]
    fn rank_roundtrip_and_order() {
        for (i, b) in LosBin::ALL.iter().enumerate() {
            assert_eq!(b.rank(), i);
            assert_eq!(LosBin::from_rank(i), Some(*b));
        }
        assert_eq!(LosBin::from_rank(3), None);
        assert!(LosBin::Short < LosBin::Medium && LosBin::Medium < LosBin::Long);
    }

    #[test]
    fn labels_serialize_as_display() {
        for b in LosBin::ALL {
            let json = serde_json::to_string(&b).unwrap();
            assert_eq!(json, format!("\"{b}\""));
            let back: LosBin = serde_json::from_str(&json).unwrap();
            assert_eq!(back, b);
        }
    }

    #[test]
    fn day_range_agrees_with_classify() {
        for b in LosBin::ALL {
            let (lo, hi) = b.day_range();
            if let Some(hi) = hi {
                assert!(b.contains(hi));
                assert!(!b.contains(hi + 1e-6));
            }
            if let Some(lo) = lo {
                assert!(!b.contains(lo));
                assert!(b.contains(lo + 1e-6));
            }
        }
    }

    #[test]
    fn bin_all_keeps_order() {
        assert_eq!(
            bin_all(&[3.0, 10.0, 20.0]),
            vec![LosBin::Short, LosBin::Medium, LosBin::Long]
        );
    }
}
