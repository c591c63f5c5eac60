//! Error types for the CLI

use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] aoc_http_client::AocError),

    /// Day discovery failed
    #[error("Discovery error: {0}")]
    Discovery(#[from] aoc_companion::DiscoveryError),

    /// A day could not be run
    #[error("Day error: {0}")]
    Day(#[from] aoc_companion::DayError),
}
