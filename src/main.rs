use anyhow::{Context, Result};
use binary_bayes::{io, NaiveBayesClassifier, ParseOptions, TokenPolicy};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Train a binary Naive Bayes classifier and label unknown instances.
#[derive(Parser, Debug)]
#[command(name = "binary-bayes", version, about, long_about = None)]
struct Cli {
    /// Labeled rows: attributes followed by the class label
    train: PathBuf,

    /// Unlabeled rows to classify
    unknown: PathBuf,

    /// Write an ID,Label CSV report to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Additive smoothing constant (0 disables smoothing)
    #[arg(long, env = "BINARY_BAYES_SMOOTHING", default_value_t = 0.0)]
    smoothing: f64,

    /// How tokens are read as booleans
    #[arg(long, env = "BINARY_BAYES_TOKENS", value_enum, default_value_t = TokenPolicy::Permissive)]
    tokens: TokenPolicy,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("binary_bayes={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let options = ParseOptions { policy: cli.tokens };
    let classifier = NaiveBayesClassifier::new().smoothing(cli.smoothing);

    let rows = io::read_rows(&cli.train)?;
    let model = binary_bayes::train(&rows, options, &classifier)
        .with_context(|| format!("training on {} failed", cli.train.display()))?
        .model;

    let rows = io::read_rows(&cli.unknown)?;
    let result = binary_bayes::classify(&rows, &model, options)
        .with_context(|| format!("classifying {} failed", cli.unknown.display()))?;

    for prediction in &result.predictions {
        println!("row {}: {}", prediction.row, prediction.instance);
    }

    if let Some(output) = &cli.output {
        io::write_predictions(output, &result.predictions)?;
    }

    Ok(())
}
