use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use shufflesort::shuffle::{
    Algorithm, Alphabet, CharPolicy, DEFAULT_MAX_LINES, SortConfig, SortError, sort_and_output,
};

#[derive(Parser, Debug)]
#[command(
    name = "shufflesort",
    version,
    about = "Sort lines of a text file under a shuffled alphabet order"
)]
struct Cli {
    /// Sorting strategy: quick, merge, radix, prefix or std
    #[arg(short = 'a', long = "algorithm", value_name = "ALGO", default_value = "merge")]
    algorithm: String,

    /// Rank bytes outside a-z after 'z' instead of rejecting the input
    #[arg(long = "fallback")]
    fallback: bool,

    /// Use RULE (a permutation of a-z) as the sort order
    #[arg(long = "rule", value_name = "RULE")]
    rule: Option<String>,

    /// Refuse inputs with more than N lines
    #[arg(long = "max-lines", value_name = "N", default_value_t = DEFAULT_MAX_LINES)]
    max_lines: usize,

    /// Require the input to have exactly N lines
    #[arg(long = "expect-lines", value_name = "N")]
    expect_lines: Option<usize>,

    /// Log phase timings to standard error
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// File to sort
    file: Option<PathBuf>,
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shufflesort=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn build_config(cli: &Cli) -> Result<SortConfig, SortError> {
    let alphabet = match cli.rule {
        Some(ref rule) => Alphabet::from_rule(rule)?,
        None => Alphabet::DEFAULT,
    };
    Ok(SortConfig {
        algorithm: cli.algorithm.parse::<Algorithm>()?,
        policy: if cli.fallback {
            CharPolicy::Fallback
        } else {
            CharPolicy::Strict
        },
        max_lines: cli.max_lines,
        expect_lines: cli.expect_lines,
        alphabet,
    })
}

fn run(cli: Cli) -> Result<(), SortError> {
    let path = cli.file.clone().ok_or_else(|| SortError::Usage {
        program: std::env::args()
            .next()
            .unwrap_or_else(|| "shufflesort".to_string()),
    })?;
    let config = build_config(&cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    sort_and_output(&path, &config, &mut out)
}

fn main() {
    shufflesort::reset_sigpipe();

    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        match e {
            SortError::Usage { .. } => eprintln!("{}", e),
            _ => eprintln!("shufflesort: {}", e),
        }
        process::exit(e.exit_code());
    }
}
