//! Report documents built from a [`BinEvaluation`].
//!
//! [`MetricsReport`] is the `metrics.json` layout read by the LOS dashboard;
//! field names follow that file, not Rust naming.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bins::LosBin;
use crate::confusion::ClassScores;
use crate::evaluator::{BinAccuracy, BinEvaluation};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub model_name: String,
    #[serde(rename = "MAE_days")]
    pub mae_days: f64,
    #[serde(rename = "RMSE_days")]
    pub rmse_days: f64,
    #[serde(rename = "R2")]
    pub r2: f64,
    pub n_samples: usize,
    pub bin_metrics: BinMetrics,
    /// Only bins with at least one actual record appear here
    pub per_bin_errors: BTreeMap<LosBin, BinErrors>,
    pub per_bin_accuracy: BTreeMap<LosBin, BinAccuracy>,
    pub bin_proportions: BTreeMap<LosBin, BinProportion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinMetrics {
    pub binned_accuracy: f64,
    pub balanced_accuracy: Option<f64>,
    pub macro_f1: Option<f64>,
    pub per_class: BTreeMap<LosBin, ClassScores>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinErrors {
    #[serde(rename = "MAE")]
    pub mae: f64,
    #[serde(rename = "MedianAE")]
    pub median_ae: f64,
    #[serde(rename = "P90AE")]
    pub p90_ae: f64,
}

/// Share of records in a bin by actual and by predicted stay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinProportion {
    pub actual: f64,
    pub predicted: f64,
}

impl MetricsReport {
    pub fn from_evaluation(model_name: impl Into<String>, eval: &BinEvaluation) -> Self {
        let per_class = LosBin::ALL
            .iter()
            .map(|&b| (b, eval.class_scores(b)))
            .collect();

        let per_bin_errors = eval
            .bins
            .iter()
            .filter_map(|s| {
                s.errors.map(|e| {
                    (
                        s.bin,
                        BinErrors {
                            mae: e.mae,
                            median_ae: e.median_ae,
                            p90_ae: e.p90_ae,
                        },
                    )
                })
            })
            .collect();

        let per_bin_accuracy = eval.bins.iter().map(|s| (s.bin, s.accuracy)).collect();

        let bin_proportions = LosBin::ALL
            .iter()
            .map(|&b| {
                (
                    b,
                    BinProportion {
                        actual: eval.confusion.actual_share(b).unwrap_or(0.0),
                        predicted: eval.confusion.predicted_share(b).unwrap_or(0.0),
                    },
                )
            })
            .collect();

        Self {
            model_name: model_name.into(),
            mae_days: eval.regression.mae,
            rmse_days: eval.regression.rmse,
            r2: eval.regression.r2,
            n_samples: eval.n,
            bin_metrics: BinMetrics {
                binned_accuracy: eval.categorical_accuracy,
                balanced_accuracy: eval.balanced_accuracy(),
                macro_f1: eval.macro_f1(),
                per_class,
            },
            per_bin_errors,
            per_bin_accuracy,
            bin_proportions,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<MetricsReport, serde_json::Error> {
        serde_json::from_str::<MetricsReport>(text)
    }
}

fn opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

fn table_row(cells: [&str; 8]) -> String {
    let [bin, actual, predicted, correct, accuracy, precision, recall, mae] = cells;
    format!(
        "{bin:<10} {actual:>8} {predicted:>9} {correct:>8} {accuracy:>9} {precision:>9} {recall:>9} {mae:>8}"
    )
}

/// Fixed-width text summary of an evaluation.
pub fn render_table(eval: &BinEvaluation) -> String {
    let r = &eval.regression;
    let mut lines = vec![
        format!("records           {}", eval.n),
        format!("MAE (days)        {:.3}", r.mae),
        format!("RMSE (days)       {:.3}", r.rmse),
        format!("R2                {:.3}", r.r2),
        format!("binned accuracy   {:.3}", eval.categorical_accuracy),
        format!("balanced accuracy {}", opt(eval.balanced_accuracy())),
        format!("macro F1          {}", opt(eval.macro_f1())),
        String::new(),
        table_row([
            "bin", "actual", "predicted", "correct", "accuracy", "precision", "recall", "MAE",
        ]),
    ];
    for s in &eval.bins {
        let scores = eval.class_scores(s.bin);
        lines.push(table_row([
            s.bin.label(),
            &s.actual_count.to_string(),
            &s.predicted_count.to_string(),
            &s.correct.to_string(),
            &s.accuracy.to_string(),
            &opt(scores.precision),
            &opt(scores.recall),
            &opt(s.errors.map(|e| e.mae)),
        ]));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate;

    #[test]
    fn report_fields_follow_evaluation() {
        let ev = evaluate(&[3.0, 10.0, 20.0], &[4.0, 9.0, 13.0]).unwrap();
        let report = MetricsReport::from_evaluation("rf", &ev);
        assert_eq!(report.model_name, "rf");
        assert_eq!(report.n_samples, 3);
        assert!((report.mae_days - 3.0).abs() < 1e-12);
        assert!((report.bin_metrics.binned_accuracy - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.per_bin_errors.len(), 3);
        let long = report.bin_proportions[&LosBin::Long];
        assert!((long.actual - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(long.predicted, 0.0);
    }

    #[test]
    fn json_uses_dashboard_keys() {
        let ev = evaluate(&[3.0, 10.0], &[4.0, 9.0]).unwrap();
        let json = MetricsReport::from_evaluation("rf", &ev)
            .to_json_pretty()
            .unwrap();
        for key in ["\"MAE_days\"", "\"RMSE_days\"", "\"R2\"", "\"binned_accuracy\"", "\"P90AE\""] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
        assert!(json.contains("\">14 days\": \"no data\""));
    }

    #[test]
    fn table_marks_empty_bins() {
        let ev = evaluate(&[3.0, 10.0], &[4.0, 9.0]).unwrap();
        let table = render_table(&ev);
        assert!(table.contains("no data"));
        assert!(table.lines().any(|l| l.starts_with("≤7 days")));
    }

    #[test]
    fn table_columns_line_up() {
        let ev = evaluate(&[3.0, 10.0, 20.0], &[4.0, 9.0, 13.0]).unwrap();
        let table = render_table(&ev);
        assert!(table.starts_with("records           3\n"));
        assert!(table.ends_with('\n'));
        let rows: Vec<&str> = table.lines().skip_while(|l| !l.is_empty()).skip(1).collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("bin "));
        for row in &rows {
            assert_eq!(row.chars().count(), 77, "{row:?}");
        }
        assert!(rows[3].starts_with(">14 days"));
        assert!(rows[3].contains("0.0%"));
    }
}
