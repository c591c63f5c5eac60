//! Error types for the companion library

use crate::result::Task;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for preprocessing raw input into a day's data package
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Input format doesn't match expected structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Required data is missing from input
    #[error("Missing data: {0}")]
    MissingData(String),
    /// Other parsing errors
    #[error("Parse error: {0}")]
    Other(String),
}

/// Error type for running a day's tasks
#[derive(Debug, Error)]
pub enum DayError {
    /// The task returned no result
    #[error("Task {0} not implemented")]
    TaskNotImplemented(Task),
    /// No task exists with the requested ordinal
    #[error("Task ordinal {0} not implemented")]
    UnknownTask(u8),
    /// Preprocessing the input failed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    /// Reading the input failed
    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// Error type for registering a day
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// The day number could not be derived from the day's name
    #[error("Day {0} has no valid formatted day number, check its name or day_number()")]
    InvalidDayName(String),
}

/// Error type for registry lookups
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// No day registered for the given year and day number
    #[error("Day not found for year {0} day {1}")]
    NotFound(u16, u8),
}

/// Error type for reading cached input
#[derive(Debug, Error)]
pub enum InputError {
    /// The cache file exists but could not be read as UTF-8 text
    #[error("Failed to read cached input {}: {source}", path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error type for per-day configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid JSON or has the wrong shape
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration is valid JSON but unusable for the day
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Error type for discovering days in a source folder
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The source folder could not be listed
    #[error("Failed to list {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A day's configuration could not be loaded or applied
    #[error("Configuration error in {}: {source}", folder.display())]
    Config {
        folder: PathBuf,
        #[source]
        source: ConfigError,
    },
    /// A discovered day could not be registered
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),
    /// A day folder has no matching plugin (strict mode only)
    #[error("No day registered for module folder {}", folder.display())]
    MissingDay { folder: PathBuf },
}
