//! Admission episodes and the prediction pairs built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bins::LosBin;

/// Value of one admission-time feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Numeric(f64),
    Categorical(String),
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Numeric(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Categorical(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Categorical(v)
    }
}

/// One admitted patient episode with its observed length of stay.
///
/// Fields are private; a record is assembled once and then only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StayRecord {
    features: BTreeMap<String, FeatureValue>,
    los_days: f64,
}

impl StayRecord {
    pub fn new(los_days: f64) -> Self {
        Self {
            features: BTreeMap::new(),
            los_days,
        }
    }

    pub fn with_feature(mut self, name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.features.insert(name.into(), value.into());
        self
    }

    pub fn los_days(&self) -> f64 {
        self.los_days
    }

    pub fn feature(&self, name: &str) -> Option<&FeatureValue> {
        self.features.get(name)
    }

    pub fn features(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.features.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn los_bin(&self) -> LosBin {
        LosBin::classify(self.los_days)
    }
}

/// Observed and predicted stay for one held-out record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPair {
    pub actual: f64,
    pub predicted: f64,
}

impl PredictionPair {
    pub fn new(actual: f64, predicted: f64) -> Self {
        Self { actual, predicted }
    }

    pub fn from_record(record: &StayRecord, predicted: f64) -> Self {
        Self::new(record.los_days(), predicted)
    }

    pub fn actual_bin(&self) -> LosBin {
        LosBin::classify(self.actual)
    }

    pub fn predicted_bin(&self) -> LosBin {
        LosBin::classify(self.predicted)
    }

    pub fn bin_matches(&self) -> bool {
        self.actual_bin() == self.predicted_bin()
    }

    pub fn abs_error(&self) -> f64 {
        (self.actual - self.predicted).abs()
    }
}

/// Split pairs into aligned `(actual, predicted)` columns.
pub fn unzip_pairs(pairs: &[PredictionPair]) -> (Vec<f64>, Vec<f64>) {
    pairs.iter().map(|p| (p.actual, p.predicted)).unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_features_are_readable() {
        let r = StayRecord::new(9.0)
            .with_feature("Department", "gynecology")
            .with_feature("Admission_Deposit", 4911.0);
        assert_eq!(r.los_days(), 9.0);
        assert_eq!(r.los_bin(), LosBin::Medium);
        assert_eq!(
            r.feature("Department"),
            Some(&FeatureValue::Categorical("gynecology".into()))
        );
        assert_eq!(r.features().count(), 2);
        assert!(r.feature("Age").is_none());
    }

    #[test]
    fn pair_bins_and_error() {
        let r = StayRecord::new(20.0);
        let p = PredictionPair::from_record(&r, 13.0);
        assert_eq!(p.actual_bin(), LosBin::Long);
        assert_eq!(p.predicted_bin(), LosBin::Medium);
        assert!(!p.bin_matches());
        assert!((p.abs_error() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn unzip_keeps_alignment() {
        let pairs = [PredictionPair::new(1.0, 2.0), PredictionPair::new(3.0, 4.0)];
        let (a, p) = unzip_pairs(&pairs);
        assert_eq!(a, vec![1.0, 3.0]);
        assert_eq!(p, vec![2.0, 4.0]);
    }
}
