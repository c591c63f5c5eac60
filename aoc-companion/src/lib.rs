//! Advent of Code Companion Library
//!
//! Runs daily Advent of Code solutions that live in per-day folders, takes care
//! of downloading and caching puzzle input, times every task and renders the
//! results as a report.
//!
//! # Overview
//!
//! This library provides:
//! - The [`Day`] trait solutions implement, with typed input preprocessing
//! - `#[derive(AocDay)]`, which makes a day discoverable from its folder
//! - A [`DayRegistry`] keyed by (year, day), owned by the [`Runner`]
//! - An [`InputFetcher`] that downloads input once and caches it in `input.txt`
//! - A report formatter for single results and result tables
//!
//! # Quick Example
//!
//! ```
//! use aoc_companion::{ConfigError, Day, DayConfig, DayInstance, InputFetcher, Runner, TaskResult};
//!
//! pub struct Day01;
//!
//! impl Day for Day01 {
//!     type Data = Vec<String>;
//!
//!     fn from_config(_config: &DayConfig) -> Result<Self, ConfigError> {
//!         Ok(Day01)
//!     }
//!
//!     fn run_t1(&self, data: &mut Self::Data) -> Option<TaskResult> {
//!         let sum: i64 = data.iter().filter_map(|l| l.parse::<i64>().ok()).sum();
//!         Some(TaskResult::new(sum))
//!     }
//!
//!     fn run_t2(&self, _data: &mut Self::Data) -> Option<TaskResult> {
//!         None
//!     }
//! }
//!
//! let folder = tempfile::tempdir().unwrap();
//! std::fs::write(folder.path().join("input.txt"), "1\n2\n3").unwrap();
//!
//! let mut runner = Runner::new(2023, InputFetcher::offline());
//! runner
//!     .register(Box::new(DayInstance::new(Day01, 2023, folder.path())))
//!     .unwrap();
//!
//! let results = runner.run(&[1]).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].result(), "6");
//! ```
//!
//! # Key Concepts
//!
//! ## Day Trait
//!
//! A [`Day`] declares its `Data` package, how it is constructed from its
//! [`DayConfig`] and its two tasks. A task returning `None` is not implemented
//! yet and is left out of the report. The day number comes from the type name:
//! `Day05` is day 5.
//!
//! ## Discovery
//!
//! Solutions are laid out as one module folder per day:
//! ```text
//! year_2023/
//!     day01/
//!         mod.rs        #[derive(AocDay)] pub struct Day01;
//!         config.json   optional settings, may override "year"
//!         input.txt     written on first download
//! ```
//! [`Runner::discover`] walks such a folder and constructs every day whose
//! plugin was submitted from a module of the same name.
//!
//! ## Input
//!
//! Input is read from the day folder's `input.txt`. When the file is missing it
//! is downloaded once, with the session from the day's `config.json` or else the
//! fetcher's fallback session, which [`InputFetcher::new`] reads from
//! `AoC_SESSION` (or `AOC_SESSION`). Failed downloads degrade to empty input.

mod cache;
mod config;
mod day;
mod error;
mod format;
mod input;
mod instance;
mod registry;
mod result;
mod runner;

// Re-export public API
pub use cache::{INPUT_FILE_NAME, InputCache};
pub use config::{CONFIG_FILE_NAME, DayConfig, SESSION_ENV_VAR, SESSION_ENV_VARS};
pub use day::{DAY_NAME_PREFIX_LEN, Day, DayId, FromInput, parse_day_number, short_type_name};
pub use error::{
    ConfigError, DayError, DiscoveryError, InputError, LookupError, ParseError, RegistrationError,
};
pub use format::{DurationSummary, NO_RESULTS, format_duration, format_results};
pub use input::{InputFetcher, NOT_UNLOCKED_MESSAGE};
pub use instance::{DayInstance, DynDay};
pub use registry::{DayFactory, DayPlugin, DayRegistry, instantiate, plugins};
pub use result::{DayRef, Task, TaskResult, UNKNOWN_DURATION};
pub use runner::{MODULE_FILE_NAME, Runner, YEAR_MODULE_PREFIX};

pub use aoc_http_client::AocClient;

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macro
pub use aoc_companion_macros::AocDay;
