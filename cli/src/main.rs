mod error_formatter;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use exprfuzz::config::{DEFAULT_BINARY, DEFAULT_ITERATIONS};
use exprfuzz::{
    evaluate_str, ExternalEvaluator, FuzzConfig, FuzzError, ReferenceLimits, ReportFormat,
    Reporter, RunOutcome, Runner, Tolerance, ToleranceMode,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Exit status when the candidate disagreed with the reference
const EXIT_MISMATCH: i32 = 1;
/// Exit status for every other failure
const EXIT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "exprfuzz")]
#[command(about = "Differential fuzzer for arithmetic expression evaluators.")]
#[command(
    long_about = "exprfuzz generates random arithmetic expressions, evaluates them with a trusted reference evaluator and with an external binary, and stops at the first disagreement.\nLogging goes to stderr and is controlled with RUST_LOG (default: exprfuzz=info)."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuzz an external evaluator against the reference evaluator
    ///
    /// Each iteration generates an expression, runs BINARY with the expression
    /// (in single quotes) as its only argument and compares its stdout with the
    /// reference value. The run stops at the first mismatch with exit status 1.
    Run {
        /// Executable of the system under test
        #[arg(short, long, default_value = DEFAULT_BINARY)]
        binary: PathBuf,
        /// Number of iterations
        #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,
        /// Seed for the expression generator (logged when omitted)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Largest accepted difference between reference and candidate
        #[arg(short, long, default_value_t = exprfuzz::comparator::DEFAULT_TOLERANCE)]
        tolerance: f64,
        /// Only fail candidates below the reference (historical one-sided check)
        #[arg(long)]
        one_sided: bool,
        /// Kill the binary after this many milliseconds (default: wait forever)
        #[arg(long = "timeout-ms", value_name = "MS")]
        timeout_ms: Option<u64>,
        /// Skip expressions whose reference value divides by zero
        #[arg(long)]
        skip_undefined: bool,
        /// Report format written to stdout
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Evaluate one expression with the reference evaluator
    ///
    /// One pair of enclosing single quotes is removed first, so a wrapper script
    /// around this command can itself be fuzzed as a known-good binary.
    Eval {
        /// Expression to evaluate, e.g. "5 + 3 * 2"
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `<candidate> == <reference>` lines
    Text,
    /// One JSON object per line
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            binary,
            iterations,
            seed,
            tolerance,
            one_sided,
            timeout_ms,
            skip_undefined,
            format,
        } => {
            let config = FuzzConfig {
                binary,
                iterations,
                seed,
                tolerance: Tolerance {
                    epsilon: tolerance,
                    mode: if one_sided {
                        ToleranceMode::OneSided
                    } else {
                        ToleranceMode::Symmetric
                    },
                },
                timeout: timeout_ms.map(Duration::from_millis),
                skip_undefined,
                ..FuzzConfig::default()
            };
            run_command(config, format.into())
        }
        Commands::Eval { expression } => eval_command(&expression),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            if let Some(fuzz_err) = e.downcast_ref::<FuzzError>() {
                eprintln!("{}", error_formatter::format_error(fuzz_err));
            } else {
                eprintln!("Error: {}", e);
            }
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "exprfuzz=info".into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn run_command(config: FuzzConfig, format: ReportFormat) -> Result<i32> {
    let mut candidate = ExternalEvaluator::new(&config.binary).with_timeout(config.timeout);
    let mut runner = Runner::new(config);
    let mut reporter = Reporter::new(io::stdout().lock(), format);

    match runner.run(&mut candidate, &mut reporter)? {
        RunOutcome::Completed { .. } => Ok(0),
        RunOutcome::Mismatch(trial) => {
            info!(
                seed = runner.seed(),
                index = trial.index,
                "Replay with --seed to reproduce"
            );
            Ok(EXIT_MISMATCH)
        }
    }
}

fn eval_command(expression: &str) -> Result<i32> {
    let expression = expression
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(expression);

    let value = evaluate_str(expression, &ReferenceLimits::default())?;
    println!("{}", value);
    Ok(0)
}
