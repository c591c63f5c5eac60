//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use chrono::Datelike;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Resolved runtime configuration
pub struct Config {
    /// Year the days are registered for
    pub year: u16,
    /// Folder scanned for day modules
    pub source_dir: PathBuf,
    /// Days to run (empty = all)
    pub days: Vec<u8>,
    /// Run only the highest registered day
    pub latest: bool,
    /// Include task logs in the report
    pub show_log: bool,
    /// Fail discovery on folders without a registered day
    pub strict: bool,
    /// Session key given on the command line (zeroized on drop)
    pub session: Option<Zeroizing<String>>,
}

impl Config {
    /// Build config from CLI args, resolving the source folder and session
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let source_dir = expand_tilde(&args.source_dir);
        if !source_dir.is_dir() {
            return Err(CliError::Config(format!(
                "Source directory does not exist: {}",
                source_dir.display()
            )));
        }

        let session = resolve_session(args.session);

        Ok(Config {
            year: args.year.unwrap_or_else(current_year),
            source_dir,
            days: args.days,
            latest: args.latest,
            show_log: !args.no_log,
            strict: args.strict,
            session,
        })
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

fn current_year() -> u16 {
    u16::try_from(chrono::Local::now().year()).unwrap_or(u16::MAX)
}

/// Empty sessions count as unset, leaving the environment fallback in place
fn resolve_session(provided: Option<String>) -> Option<Zeroizing<String>> {
    provided.filter(|s| !s.is_empty()).map(Zeroizing::new)
}
