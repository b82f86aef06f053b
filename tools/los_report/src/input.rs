use los_eval::{unzip_pairs, PredictionPair};
use serde::Deserialize;

/// Accepted layouts of a predictions file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PredictionInput {
    /// `{"actual": [...], "predicted": [...]}`
    Columns {
        actual: Vec<f64>,
        predicted: Vec<f64>,
    },
    /// `[{"actual": x, "predicted": y}, ...]`
    Pairs(Vec<PredictionPair>),
}

impl PredictionInput {
    /// Aligned `(actual, predicted)` columns. Column lengths are not
    /// checked here; the evaluator reports a mismatch.
    pub fn into_columns(self) -> (Vec<f64>, Vec<f64>) {
        match self {
            PredictionInput::Columns { actual, predicted } => (actual, predicted),
            PredictionInput::Pairs(pairs) => unzip_pairs(&pairs),
        }
    }
}

pub fn parse_predictions(text: &str) -> Result<PredictionInput, serde_json::Error> {
    serde_json::from_str::<PredictionInput>(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_columns() {
        let input = parse_predictions(r#"{"actual": [3, 10], "predicted": [4.0, 9.5]}"#).unwrap();
        assert_eq!(input.into_columns(), (vec![3.0, 10.0], vec![4.0, 9.5]));
    }

    #[test]
    fn parses_pairs() {
        let input = parse_predictions(
            r#"[{"actual": 3, "predicted": 4}, {"actual": 20, "predicted": 13}]"#,
        )
        .unwrap();
        assert_eq!(input.into_columns(), (vec![3.0, 20.0], vec![4.0, 13.0]));
    }

    #[test]
    fn keeps_mismatched_columns_for_the_evaluator() {
        let input = parse_predictions(r#"{"actual": [1, 2, 3], "predicted": [1]}"#).unwrap();
        let (a, p) = input.into_columns();
        assert_eq!((a.len(), p.len()), (3, 1));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(parse_predictions(r#"{"actual": [1]}"#).is_err());
        assert!(parse_predictions("not json").is_err());
    }
}
