//! Task identifiers and the per-task result value

use crate::day::DayId;
use std::fmt;
use std::time::Duration;

/// Duration sentinel for a result whose run time is unknown
pub const UNKNOWN_DURATION: f64 = -1.0;

/// One of the two tasks of a day, ordered by ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Task {
    Task01 = 1,
    Task02 = 2,
}

impl Task {
    /// Both tasks in ascending ordinal order
    pub const ALL: [Task; 2] = [Task::Task01, Task::Task02];

    /// Ordinal used for ordering and dispatch
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Task for an ordinal, `None` if no such task exists
    pub fn from_ordinal(ordinal: u8) -> Option<Task> {
        match ordinal {
            1 => Some(Task::Task01),
            2 => Some(Task::Task02),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Task::Task01 => "Task01",
            Task::Task02 => "Task02",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Back-reference from a result to the day that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRef {
    pub id: DayId,
    pub name: String,
}

/// Outcome of running one task
///
/// Days build these with the `with_*` methods; the day and task
/// back-references are filled in by the runner when the day leaves them
/// unset.
///
/// # Example
///
/// ```
/// use aoc_companion::TaskResult;
///
/// let mut result = TaskResult::new(42).with_duration(0.25);
/// result.log("scanned 3 rows");
/// assert_eq!(result.result(), "42");
/// assert_eq!(result.log_lines(), ["scanned 3 rows"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    day: Option<DayRef>,
    task: Option<Task>,
    result: String,
    duration: f64,
    log: Vec<String>,
}

impl TaskResult {
    /// Create a result with unknown duration and an empty log
    pub fn new(result: impl ToString) -> Self {
        Self {
            day: None,
            task: None,
            result: result.to_string(),
            duration: UNKNOWN_DURATION,
            log: Vec::new(),
        }
    }

    /// Set the duration in seconds; negative means unknown
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_elapsed(self, elapsed: Duration) -> Self {
        self.with_duration(elapsed.as_secs_f64())
    }

    pub fn with_log<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.log.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn with_day(mut self, day: DayRef) -> Self {
        self.day = Some(day);
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.task = Some(task);
        self
    }

    /// Append a line to the log
    pub fn log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    pub fn day(&self) -> Option<&DayRef> {
        self.day.as_ref()
    }

    pub fn task(&self) -> Option<Task> {
        self.task
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    /// Duration in seconds, [`UNKNOWN_DURATION`] if not known
    pub fn duration(&self) -> f64 {
        if self.has_duration() {
            self.duration
        } else {
            UNKNOWN_DURATION
        }
    }

    pub fn has_duration(&self) -> bool {
        self.duration >= 0.0
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    /// Fill the back-references and duration the day left unset
    pub(crate) fn stamp(&mut self, day: &DayRef, task: Task, elapsed: Duration) {
        if self.day.is_none() {
            self.day = Some(day.clone());
        }
        if self.task.is_none() {
            self.task = Some(task);
        }
        if !self.has_duration() {
            self.duration = elapsed.as_secs_f64();
        }
    }
}
