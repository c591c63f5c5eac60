//! AOC CLI - Command-line interface for running Advent of Code days

mod cli;
mod config;
mod error;

// Import aoc-solutions to link the day plugins
use aoc_solutions as _;

use aoc_companion::{InputFetcher, Runner, format_results};
use aoc_http_client::AocClient;
use clap::Parser;
use cli::Args;
use config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, `RUST_LOG` overrides the verbosity flag
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;

    // Falls back to the session from the environment
    let mut fetcher = InputFetcher::new(AocClient::new()?);
    if let Some(session) = &config.session {
        fetcher = fetcher.with_session(session.as_str());
    }

    let mut runner = Runner::new(config.year, fetcher).strict(config.strict);
    let found = runner.discover(&config.source_dir)?;
    info!(
        year = config.year,
        count = found.len(),
        source_dir = %config.source_dir.display(),
        "Discovered days"
    );

    let results = if config.latest {
        runner.run_latest()?
    } else {
        runner.run(&config.days)?
    };

    println!("{}", format_results(&results, config.show_log));
    Ok(())
}
