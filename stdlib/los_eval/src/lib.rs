//! Length-of-stay bin evaluation.
//!
//! Converts a continuous LOS regressor's output on a held-out set into
//! clinically interpretable per-bin accuracy, alongside global MAE, RMSE
//! and R².
//!
//! ```
//! use los_eval::{evaluate, BinAccuracy, LosBin};
//!
//! let ev = evaluate(&[3.0, 10.0, 20.0], &[4.0, 9.0, 13.0]).unwrap();
//! assert_eq!(ev.accuracy(LosBin::Long), BinAccuracy::Measured(0.0));
//! assert!((ev.categorical_accuracy - 2.0 / 3.0).abs() < 1e-12);
//! ```

pub mod bins;
pub mod confusion;
pub mod error;
pub mod evaluator;
pub mod record;
pub mod report;

pub use bins::{bin_all, bin_of, LosBin, BIN_COUNT, MEDIUM_MAX_DAYS, SHORT_MAX_DAYS};
pub use confusion::{BinConfusion, ClassScores};
pub use error::{EvalError, Series};
pub use evaluator::{
    evaluate, evaluate_pairs, BinAccuracy, BinEvaluation, BinStats, MAX_LOS_DAYS,
};
pub use los_stats::{ErrorSummary, RegressionMetrics};
pub use record::{unzip_pairs, FeatureValue, PredictionPair, StayRecord};
pub use report::{render_table, BinErrors, BinMetrics, BinProportion, MetricsReport};
