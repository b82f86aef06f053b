//! Command-line surface for length-of-stay bin evaluation.
//!
//! Reads prediction pairs as JSON, evaluates them with [`los_eval`] and
//! renders a text table or the dashboard's `metrics.json` document.

pub mod config;
pub mod input;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::info;
use los_eval::{evaluate, render_table, EvalError, MetricsReport};
use thiserror::Error;

pub use config::{parse_config, ReportConfig, DEFAULT_CONFIG_FILE};
pub use input::{parse_predictions, PredictionInput};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("'{}' already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    ConfigSer(#[from] toml::ser::Error),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl CliError {
    /// Process exit code: 1 for evaluation failures, 2 for I/O, parse and
    /// config problems.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Eval(_) => 1,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct EvaluateOptions {
    /// `None` or `-` reads stdin
    pub input: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub model_name: Option<String>,
    pub out: Option<PathBuf>,
    pub write_artifacts: bool,
    pub format: OutputFormat,
}

pub fn load_config(path: Option<&Path>) -> Result<ReportConfig, CliError> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(parse_config(&text)?)
        }
        None => Ok(ReportConfig::default()),
    }
}

const STDIN_LABEL: &str = "<stdin>";

/// Drain `reader` into a string; used for the stdin input path.
fn read_stream<R: Read>(mut reader: R) -> Result<String, CliError> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|source| CliError::Read {
            path: PathBuf::from(STDIN_LABEL),
            source,
        })?;
    Ok(buf)
}

/// Read from `path`, or from `stdin` when the path is absent or `-`.
fn read_input<R: Read>(path: Option<&Path>, stdin: R) -> Result<String, CliError> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p).map_err(|source| CliError::Read {
            path: p.to_path_buf(),
            source,
        }),
        _ => read_stream(stdin),
    }
}

fn write_report(path: &Path, json: &str) -> Result<(), CliError> {
    let to_err = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(to_err)?;
    }
    fs::write(path, json).map_err(to_err)?;
    info!("wrote metrics report to {}", path.display());
    Ok(())
}

/// Result of one `evaluate` invocation
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluateOutcome {
    pub report: MetricsReport,
    /// What goes to stdout
    pub rendered: String,
    pub written: Vec<PathBuf>,
}

/// Evaluate prediction JSON `text` without touching the filesystem.
pub fn evaluate_text(
    text: &str,
    model_name: &str,
    format: OutputFormat,
) -> Result<(MetricsReport, String), CliError> {
    let (actual, predicted) = parse_predictions(text)?.into_columns();
    let eval = evaluate(&actual, &predicted)?;
    let report = MetricsReport::from_evaluation(model_name, &eval);
    let rendered = match format {
        OutputFormat::Text => render_table(&eval),
        OutputFormat::Json => report.to_json_pretty()?,
    };
    Ok((report, rendered))
}

pub fn run_evaluate(opts: &EvaluateOptions) -> Result<EvaluateOutcome, CliError> {
    run_evaluate_with_stdin(opts, io::stdin())
}

/// Same as [`run_evaluate`], with `stdin` standing in for standard input.
pub fn run_evaluate_with_stdin<R: Read>(
    opts: &EvaluateOptions,
    stdin: R,
) -> Result<EvaluateOutcome, CliError> {
    let config = load_config(opts.config.as_deref())?;
    let model_name = opts.model_name.as_deref().unwrap_or(&config.model_name);
    let text = read_input(opts.input.as_deref(), stdin)?;
    let (report, rendered) = evaluate_text(&text, model_name, opts.format)?;

    let mut targets = Vec::new();
    if let Some(out) = &opts.out {
        targets.push(out.clone());
    }
    if opts.write_artifacts {
        targets.push(config.metrics_path());
    }
    if !targets.is_empty() {
        let json = report.to_json_pretty()?;
        for path in &targets {
            write_report(path, &json)?;
        }
    }

    Ok(EvaluateOutcome {
        report,
        rendered,
        written: targets,
    })
}

/// Write a default config to `path`, refusing to overwrite.
pub fn init_config(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        return Err(CliError::AlreadyExists(path.to_path_buf()));
    }
    let text = ReportConfig::default().to_toml()?;
    fs::write(path, text).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}
