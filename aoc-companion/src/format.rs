//! Human-readable rendering of task results

use crate::result::TaskResult;
use chrono::TimeDelta;
use std::collections::BTreeSet;
use std::fmt::{self, Write};

/// Output for an empty result list
pub const NO_RESULTS: &str = "No results";

/// Render seconds as `H:MM:SS`, with `.ffffff` for fractions and a day count
/// for spans of a day or longer. Negative or NaN seconds render as `unknown`.
///
/// ```
/// use aoc_companion::format_duration;
///
/// assert_eq!(format_duration(5.0), "0:00:05");
/// assert_eq!(format_duration(3725.5), "1:02:05.500000");
/// assert_eq!(format_duration(-1.0), "unknown");
/// ```
pub fn format_duration(seconds: f64) -> String {
    if seconds.is_nan() || seconds < 0.0 {
        return "unknown".to_string();
    }

    let delta = TimeDelta::microseconds((seconds * 1_000_000.0).round() as i64);
    let days = delta.num_days();
    let hours = delta.num_hours() % 24;
    let minutes = delta.num_minutes() % 60;
    let secs = delta.num_seconds() % 60;
    let micros = delta.subsec_nanos() / 1000;

    let mut out = String::new();
    if days > 0 {
        let _ = write!(out, "{} day{}, ", days, if days == 1 { "" } else { "s" });
    }
    let _ = write!(out, "{}:{:02}:{:02}", hours, minutes, secs);
    if micros > 0 {
        let _ = write!(out, ".{:06}", micros);
    }
    out
}

impl TaskResult {
    /// Lines of this result's block: header, duration, then the log if wanted
    pub fn to_lines(&self, show_log: bool) -> Vec<String> {
        let day_name = self.day().map_or("None", |d| d.name.as_str());
        let task_name = self.task().map_or("None", |t| t.name());

        let mut lines: Vec<String> = format!("{} - {}: {}", day_name, task_name, self.result())
            .lines()
            .map(str::to_string)
            .collect();
        lines.push(format!("{:<14}: {}", "Duration", format_duration(self.duration())));

        if show_log && !self.log_lines().is_empty() {
            lines.push("Log:".to_string());
            lines.extend(self.log_lines().iter().map(|l| format!("    {}", l)));
        }
        lines
    }
}

impl fmt::Display for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_lines(true).join("\n"))
    }
}

/// Totals over the results that carry a known duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationSummary {
    /// Number of results
    pub results: usize,
    /// Number of distinct years among results with a day
    pub years: usize,
    /// Number of results with a known duration
    pub timed: usize,
    /// Sum of known durations in seconds
    pub sum: f64,
    /// Average of known durations in seconds, 0 when none are known
    pub average: f64,
}

impl DurationSummary {
    pub fn from_results(results: &[TaskResult]) -> Self {
        let years: BTreeSet<u16> = results
            .iter()
            .filter_map(|r| r.day().map(|d| d.id.year))
            .collect();
        let durations: Vec<f64> = results
            .iter()
            .filter(|r| r.has_duration())
            .map(TaskResult::duration)
            .collect();
        let sum: f64 = durations.iter().sum();
        let average = if durations.is_empty() {
            0.0
        } else {
            sum / durations.len() as f64
        };

        Self {
            results: results.len(),
            years: years.len(),
            timed: durations.len(),
            sum,
            average,
        }
    }

    fn to_lines(self) -> Vec<String> {
        vec![
            format!("Results:       {}", self.results),
            format!("Years run:     {}", self.years),
            format!("Sum Duration*: {:.6}s", self.sum),
            format!("Avg Duration*: {:.6}s", self.average),
            "*Only tasks that provided a duration>=0 are considered".to_string(),
        ]
    }
}

/// Render results as a report
///
/// No results give [`NO_RESULTS`], a single result gives its block, several
/// results give a bordered table closed by a duration summary.
pub fn format_results(results: &[TaskResult], show_log: bool) -> String {
    match results {
        [] => NO_RESULTS.to_string(),
        [single] => single.to_lines(show_log).join("\n"),
        _ => format_table(results, show_log),
    }
}

fn format_table(results: &[TaskResult], show_log: bool) -> String {
    let blocks: Vec<Vec<String>> = results.iter().map(|r| r.to_lines(show_log)).collect();
    let summary = DurationSummary::from_results(results).to_lines();

    let width = blocks
        .iter()
        .flatten()
        .chain(summary.iter())
        .map(|l| l.chars().count())
        .max()
        .unwrap_or_default();
    let separator = format!("+{}+", "-".repeat(width + 2));
    let row = |line: &String| format!("| {:<width$} |", line, width = width);

    let mut out = vec![separator.clone()];
    for block in &blocks {
        out.extend(block.iter().map(row));
        out.push(separator.clone());
    }
    out.extend(summary.iter().map(row));
    out.push(separator);
    out.join("\n")
}
