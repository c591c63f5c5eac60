use anyhow::anyhow;
use aoc_companion::{AocDay, ConfigError, Day, DayConfig, FromInput, ParseError, TaskResult};
use serde::Deserialize;

/// Safe dial: count how often rotations leave it at, or sweep it past, zero
#[derive(AocDay)]
pub struct Day01 {
    start: i32,
    dial_size: i32,
}

#[derive(Deserialize)]
struct Settings {
    #[serde(default = "default_start")]
    start: i32,
    #[serde(default = "default_dial_size")]
    dial_size: i32,
}

fn default_start() -> i32 {
    50
}

fn default_dial_size() -> i32 {
    100
}

#[derive(Debug)]
pub struct Rotations {
    steps: Vec<i32>,
    counts: Option<ZeroCounts>,
}

#[derive(Debug, Clone, Copy)]
struct ZeroCounts {
    stops: u32,
    passes: u32,
}

impl FromInput for Rotations {
    fn from_input(raw: &str) -> Result<Self, ParseError> {
        raw.trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                parse_rotation(line.trim()).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|steps| Rotations { steps, counts: None })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_rotation(line: &str) -> anyhow::Result<i32> {
    let negative = match line.as_bytes().first() {
        Some(b'L') => true,
        Some(b'R') => false,
        _ => return Err(anyhow!("first character need to be 'L' or 'R'")),
    };

    let value: i32 = line[1..].parse()?;
    if value < 0 {
        Err(anyhow!("Rotate value must be non negative"))
    } else if negative {
        Ok(-value)
    } else {
        Ok(value)
    }
}

impl Day01 {
    /// Both tasks share one pass over the rotations
    fn zero_counts(&self, data: &mut Rotations) -> ZeroCounts {
        let (start, size) = (self.start, self.dial_size);
        *data.counts.get_or_insert_with(|| {
            let (_, stops, passes) = data.steps.iter().fold(
                (start, 0u32, 0u32),
                |(mut dial, mut stops, mut passes), step| {
                    let old_dial = dial;
                    dial += step;
                    if dial <= 0 && old_dial != 0 {
                        passes += 1;
                    }
                    passes += (dial / size).unsigned_abs();
                    dial = dial.rem_euclid(size);
                    if dial == 0 {
                        stops += 1;
                    }
                    (dial, stops, passes)
                },
            );
            ZeroCounts { stops, passes }
        })
    }
}

impl Day for Day01 {
    type Data = Rotations;

    fn from_config(config: &DayConfig) -> Result<Self, ConfigError> {
        let settings: Settings = config.settings()?;
        if settings.dial_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "dial_size must be positive, got {}",
                settings.dial_size
            )));
        }
        Ok(Day01 {
            start: settings.start.rem_euclid(settings.dial_size),
            dial_size: settings.dial_size,
        })
    }

    fn run_t1(&self, data: &mut Self::Data) -> Option<TaskResult> {
        let counts = self.zero_counts(data);
        Some(TaskResult::new(counts.stops).with_log([format!("{} rotations", data.steps.len())]))
    }

    fn run_t2(&self, data: &mut Self::Data) -> Option<TaskResult> {
        Some(TaskResult::new(self.zero_counts(data).passes))
    }
}
