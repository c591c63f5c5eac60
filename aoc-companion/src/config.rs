//! Per-day configuration loaded from `config.json`

use crate::error::ConfigError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::Path;
use zeroize::Zeroizing;

/// File name of the optional per-day configuration
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable holding the fallback session
pub const SESSION_ENV_VAR: &str = "AoC_SESSION";

/// Variables the fallback session is looked up in, in order
pub const SESSION_ENV_VARS: [&str; 2] = [SESSION_ENV_VAR, "AOC_SESSION"];

/// Merged configuration a day is constructed from
///
/// Built from `{"year": <runner year>}` with the keys of the day's
/// `config.json` layered on top. `year` and `session` (alias `session_id`) are
/// understood by the companion itself, every other key is a day-specific
/// setting.
///
/// # Example
///
/// ```
/// use aoc_companion::DayConfig;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Settings {
///     start: i16,
/// }
///
/// let config = DayConfig::new(2025).with_setting("start", 50);
/// let settings: Settings = config.settings().unwrap();
/// assert_eq!(settings.start, 50);
/// ```
#[derive(Clone, Deserialize)]
pub struct DayConfig {
    pub year: u16,
    #[serde(default, alias = "session_id")]
    session: Option<String>,
    #[serde(flatten)]
    settings: Map<String, Value>,
}

impl DayConfig {
    /// Configuration with only a year set
    pub fn new(year: u16) -> Self {
        Self {
            year,
            session: None,
            settings: Map::new(),
        }
    }

    /// Load the configuration for a day folder
    ///
    /// A missing `config.json` yields the defaults. Keys in the file override
    /// the injected year.
    pub fn load(folder: &Path, year: u16) -> Result<Self, ConfigError> {
        let mut merged = Map::new();
        merged.insert("year".to_string(), Value::from(year));

        let path = folder.join(CONFIG_FILE_NAME);
        if path.is_file() {
            let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            match serde_json::from_str::<Value>(&content)? {
                Value::Object(file) => merged.extend(file),
                other => {
                    return Err(ConfigError::Invalid(format!(
                        "{} must contain a JSON object, found {}",
                        path.display(),
                        other
                    )));
                }
            }
        }

        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Raw value of a day-specific setting
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Deserialize the day-specific settings into a typed struct
    pub fn settings<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        Ok(serde_json::from_value(Value::Object(self.settings.clone()))?)
    }

    /// Session credential configured for the day, if any
    pub fn session(&self) -> Option<Zeroizing<String>> {
        self.session
            .clone()
            .filter(|s| !s.is_empty())
            .map(Zeroizing::new)
    }
}

impl fmt::Debug for DayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DayConfig")
            .field("year", &self.year)
            .field("session", &self.session.as_ref().map(|_| "<redacted>"))
            .field("settings", &self.settings)
            .finish()
    }
}
