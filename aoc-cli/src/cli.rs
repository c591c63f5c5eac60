//! CLI argument parsing using clap

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Advent of Code day runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code days", version)]
pub struct Args {
    /// Days to run (runs all discovered days if omitted)
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    pub days: Vec<u8>,

    /// Year to run (current year if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Folder holding one module folder per day
    #[arg(short, long)]
    pub source_dir: PathBuf,

    /// Run only the highest registered day
    #[arg(short, long, conflicts_with = "days")]
    pub latest: bool,

    /// Leave task logs out of the report
    #[arg(long)]
    pub no_log: bool,

    /// Fail when a day folder has no registered day
    #[arg(long)]
    pub strict: bool,

    /// Session key for downloading inputs (falls back to AoC_SESSION)
    #[arg(long)]
    pub session: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
