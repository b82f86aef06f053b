use std::fmt;

use thiserror::Error;

/// Which of the two aligned input sequences a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Actual,
    Predicted,
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Series::Actual => f.write_str("actual"),
            Series::Predicted => f.write_str("predicted"),
        }
    }
}

/// Errors that abort an evaluation run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("input shape mismatch: {actual} actual values vs {predicted} predicted values")]
    InputShape { actual: usize, predicted: usize },
    #[error("no prediction pairs to evaluate")]
    EmptyInput,
    #[error("invalid {series} length of stay at index {index}: {value}")]
    InvalidValue {
        series: Series,
        index: usize,
        value: f64,
    },
}
