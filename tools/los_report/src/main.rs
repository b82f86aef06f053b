use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::{debug, LevelFilter};
use los_report::{init_config, run_evaluate, EvaluateOptions, OutputFormat, DEFAULT_CONFIG_FILE};

#[derive(Debug, Parser)]
#[command(
    name = "los_report",
    version,
    about = "Evaluate length-of-stay predictions within clinical LOS bins",
    long_about = "los_report scores a length-of-stay regressor on a held-out set.\n\n\
        Stays are grouped into clinical bins (<=7, 8-14, >14 days); the report shows\n\
        global MAE/RMSE/R2 and how often each bin is recovered from the prediction.\n\n\
        EXAMPLES:\n\
        \n  los_report evaluate holdout.json                     Print a summary table\n\
        \n  los_report evaluate --format json holdout.json       Print metrics.json\n\
        \n  los_report evaluate --write-artifacts holdout.json   Write artifacts/metrics.json\n\
        \n  cat holdout.json | los_report evaluate -             Read pairs from stdin"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate actual/predicted stays and report binned metrics
    Evaluate(EvaluateArgs),
    /// Write a default los_report.toml
    InitConfig {
        #[arg(value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
    },
}

#[derive(Debug, Args, Clone)]
struct EvaluateArgs {
    /// JSON predictions file (`-` or omitted reads stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// TOML report config
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Model name recorded in the report (overrides the config)
    #[arg(long, value_name = "NAME")]
    model_name: Option<String>,

    /// Also write the JSON report to this file
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Also write the JSON report to the config's artifacts location
    #[arg(long)]
    write_artifacts: bool,

    /// Output format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl From<EvaluateArgs> for EvaluateOptions {
    fn from(args: EvaluateArgs) -> Self {
        EvaluateOptions {
            input: args.input,
            config: args.config,
            model_name: args.model_name,
            out: args.out,
            write_artifacts: args.write_artifacts,
            format: args.format,
        }
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for(verbose))
        .parse_default_env()
        .try_init();
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Evaluate(args) => run_evaluate(&args.into()).map(|outcome| {
            print!("{}", outcome.rendered);
            if !outcome.rendered.ends_with('\n') {
                println!();
            }
            debug!("report written to {} file(s)", outcome.written.len());
        }),
        Command::InitConfig { path } => init_config(&path),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

fn main() {
    std::process::exit(run_cli());
}
