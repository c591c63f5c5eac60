//! The day contract every puzzle solution implements

use crate::config::DayConfig;
use crate::error::{ConfigError, ParseError};
use crate::result::TaskResult;
use std::fmt;

/// Length of the textual prefix in front of the day number (`Day05`)
pub const DAY_NAME_PREFIX_LEN: usize = 3;

/// Identity of a day, ordered by year then day number
///
/// Day numbers are `u8`: a name like `Day256` has no day number and the day
/// cannot be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayId {
    pub year: u16,
    pub day: u8,
}

impl DayId {
    pub fn new(year: u16, day: u8) -> Self {
        Self { year, day }
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/day{:02}", self.year, self.day)
    }
}

/// Parse the day number from a day name such as `Day05`
///
/// The first [`DAY_NAME_PREFIX_LEN`] characters are skipped and the rest must
/// be an integer that fits a `u8`.
///
/// ```
/// use aoc_companion::parse_day_number;
///
/// assert_eq!(parse_day_number("Day05"), Some(5));
/// assert_eq!(parse_day_number("Day"), None);
/// assert_eq!(parse_day_number("DayFive"), None);
/// assert_eq!(parse_day_number("Day256"), None);
/// ```
pub fn parse_day_number(name: &str) -> Option<u8> {
    let suffix_start = name
        .char_indices()
        .nth(DAY_NAME_PREFIX_LEN)
        .map(|(i, _)| i)?;
    name[suffix_start..].parse().ok()
}

/// Last path segment of a type name, `my_crate::day05::Day05` becomes `Day05`
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Conversion from raw puzzle input into a day's data package
///
/// `Vec<String>` splits the input into lines on `'\n'`, keeping a trailing empty
/// line if the input ends with a newline. `String` keeps the raw text.
pub trait FromInput: Sized {
    fn from_input(raw: &str) -> Result<Self, ParseError>;
}

impl FromInput for Vec<String> {
    fn from_input(raw: &str) -> Result<Self, ParseError> {
        Ok(raw.split('\n').map(str::to_string).collect())
    }
}

impl FromInput for String {
    fn from_input(raw: &str) -> Result<Self, ParseError> {
        Ok(raw.to_string())
    }
}

/// Core trait that every daily solution implements.
///
/// A day turns raw input into its `Data` package and solves up to two tasks
/// from it. Returning `None` from a task means it is not implemented yet; the
/// runner skips it silently.
///
/// # Example
///
/// ```
/// use aoc_companion::{ConfigError, Day, DayConfig, TaskResult};
///
/// pub struct Day01;
///
/// impl Day for Day01 {
///     type Data = Vec<String>;
///
///     fn from_config(_config: &DayConfig) -> Result<Self, ConfigError> {
///         Ok(Day01)
///     }
///
///     fn run_t1(&self, data: &mut Self::Data) -> Option<TaskResult> {
///         Some(TaskResult::new(data.iter().filter(|l| !l.is_empty()).count()))
///     }
///
///     fn run_t2(&self, _data: &mut Self::Data) -> Option<TaskResult> {
///         None
///     }
/// }
///
/// assert_eq!(Day01.day_number(), Some(1));
/// ```
pub trait Day: Sized + 'static {
    /// Data package both tasks work on. Tasks get mutable access so the first
    /// task can leave intermediate results for the second.
    type Data: FromInput;

    /// Construct the day from its merged configuration
    fn from_config(config: &DayConfig) -> Result<Self, ConfigError>;

    /// Solve the first task
    fn run_t1(&self, data: &mut Self::Data) -> Option<TaskResult>;

    /// Solve the second task
    fn run_t2(&self, data: &mut Self::Data) -> Option<TaskResult>;

    /// Turn raw input into the data package
    fn pre_process_input(&self, raw: &str) -> Result<Self::Data, ParseError> {
        Self::Data::from_input(raw)
    }

    /// Name of the day, the declared type name by default
    fn name(&self) -> &str {
        short_type_name::<Self>()
    }

    /// Day number parsed from [`Day::name`]
    fn day_number(&self) -> Option<u8> {
        parse_day_number(self.name())
    }
}
