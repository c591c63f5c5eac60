use anyhow::{Context, anyhow};
use aoc_companion::{AocDay, ConfigError, Day, DayConfig, FromInput, ParseError, TaskResult};
use std::ops::RangeInclusive;

/// Gift shop: sum product IDs made of a repeated digit sequence
#[derive(AocDay)]
pub struct Day02;

#[derive(Debug)]
pub struct IdRanges(Vec<RangeInclusive<u64>>);

impl FromInput for IdRanges {
    fn from_input(raw: &str) -> Result<Self, ParseError> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_range)
            .collect::<anyhow::Result<Vec<_>>>()
            .map(IdRanges)
            .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))
    }
}

fn parse_range(s: &str) -> anyhow::Result<RangeInclusive<u64>> {
    let (lo, hi) = s
        .split_once('-')
        .ok_or_else(|| anyhow!("range `{}` is missing '-'", s))?;
    let lo: u64 = lo.parse().with_context(|| format!("bad range start in `{}`", s))?;
    let hi: u64 = hi.parse().with_context(|| format!("bad range end in `{}`", s))?;
    Ok(lo..=hi)
}

/// Whether `id` is some digit block repeated exactly `times` times
fn repeats(digits: &[u8], times: usize) -> bool {
    times >= 2
        && digits.len() % times == 0
        && digits
            .chunks(digits.len() / times)
            .all(|chunk| chunk == &digits[..digits.len() / times])
}

fn sum_ids(ranges: &IdRanges, invalid: impl Fn(&[u8]) -> bool) -> u64 {
    ranges
        .0
        .iter()
        .flat_map(|r| r.clone())
        .filter(|id| invalid(id.to_string().as_bytes()))
        .sum()
}

impl Day for Day02 {
    type Data = IdRanges;

    fn from_config(_config: &DayConfig) -> Result<Self, ConfigError> {
        Ok(Day02)
    }

    fn run_t1(&self, data: &mut Self::Data) -> Option<TaskResult> {
        Some(TaskResult::new(sum_ids(data, |d| repeats(d, 2))))
    }

    fn run_t2(&self, data: &mut Self::Data) -> Option<TaskResult> {
        Some(TaskResult::new(sum_ids(data, |d| {
            (2..=d.len()).any(|times| repeats(d, times))
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "11-22,95-115,998-1012,1188511880-1188511890,222220-222224,\
        1698522-1698528,446443-446449,38593856-38593862,565653-565659,\
        824824821-824824827,2121212118-2121212124\n";

    #[test]
    fn test_example() {
        let mut data = Day02.pre_process_input(EXAMPLE).unwrap();
        assert_eq!(data.0.len(), 11);
        assert_eq!(Day02.run_t1(&mut data).unwrap().result(), "1227775554");
        assert_eq!(Day02.run_t2(&mut data).unwrap().result(), "4174379265");
    }

    #[test]
    fn test_repeats() {
        assert!(repeats(b"1212", 2));
        assert!(repeats(b"111", 3));
        assert!(!repeats(b"111", 2));
        assert!(!repeats(b"7", 1));
        assert!(!repeats(b"123123124", 3));
    }

    #[test]
    fn test_small_ranges() {
        let mut data = Day02.pre_process_input("1-99").unwrap();
        assert_eq!(Day02.run_t1(&mut data).unwrap().result(), "495");
        assert_eq!(Day02.run_t2(&mut data).unwrap().result(), "495");
    }

    #[test]
    fn test_parse_errors() {
        assert!(Day02.pre_process_input("12").is_err());
        assert!(Day02.pre_process_input("a-5").is_err());
        assert!(Day02.pre_process_input("").unwrap().0.is_empty());
    }
}
