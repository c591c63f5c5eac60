//! Day instances bound to their year, session and source folder

use crate::cache::InputCache;
use crate::config::DayConfig;
use crate::day::{Day, DayId};
use crate::error::{ConfigError, DayError, RegistrationError};
use crate::input::InputFetcher;
use crate::result::{DayRef, Task, TaskResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use zeroize::Zeroizing;

/// A [`Day`] together with the context it runs in
///
/// Provides the operations the runner drives: building the data package,
/// running one task and running both tasks in order.
pub struct DayInstance<D: Day> {
    day: D,
    year: u16,
    session: Option<Zeroizing<String>>,
    source_dir: PathBuf,
}

impl<D: Day> DayInstance<D> {
    /// Bind an already constructed day to its context
    pub fn new(day: D, year: u16, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            day,
            year,
            session: None,
            source_dir: source_dir.into(),
        }
    }

    /// Construct the day from its configuration
    ///
    /// Without a configured session the fetcher's fallback session is used.
    pub fn from_config(config: &DayConfig, source_dir: &Path) -> Result<Self, ConfigError> {
        let day = D::from_config(config)?;
        Ok(Self {
            day,
            year: config.year,
            session: config.session(),
            source_dir: source_dir.to_path_buf(),
        })
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(Zeroizing::new(session.into()));
        self
    }

    pub fn day(&self) -> &D {
        &self.day
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn day_number(&self) -> Option<u8> {
        self.day.day_number()
    }

    fn day_ref(&self) -> DayRef {
        DayRef {
            id: DayId::new(self.year, self.day_number().unwrap_or_default()),
            name: self.day.name().to_string(),
        }
    }

    /// Fetch the raw input through `fetcher` and preprocess it
    pub fn build_data_package(&self, fetcher: &InputFetcher) -> Result<D::Data, DayError> {
        let cache = InputCache::new(&self.source_dir);
        let raw = fetcher.get_input(
            &cache,
            self.day_number().unwrap_or_default(),
            self.year,
            self.session.as_deref().map(String::as_str),
        )?;
        Ok(self.day.pre_process_input(&raw)?)
    }

    /// Run one task and stamp the result with this day, the task and the
    /// measured duration where the day left them unset
    ///
    /// # Errors
    ///
    /// `DayError::TaskNotImplemented` if the task returned no result.
    pub fn run(&self, task: Task, data: &mut D::Data) -> Result<TaskResult, DayError> {
        let start = Instant::now();
        let result = match task {
            Task::Task01 => self.day.run_t1(data),
            Task::Task02 => self.day.run_t2(data),
        };
        let elapsed = start.elapsed();

        let mut result = result.ok_or(DayError::TaskNotImplemented(task))?;
        result.stamp(&self.day_ref(), task, elapsed);
        Ok(result)
    }

    /// Run a task by ordinal
    ///
    /// # Errors
    ///
    /// `DayError::UnknownTask` for ordinals other than 1 and 2, otherwise as
    /// [`DayInstance::run`].
    pub fn run_task(&self, ordinal: u8, data: &mut D::Data) -> Result<TaskResult, DayError> {
        let task = Task::from_ordinal(ordinal).ok_or(DayError::UnknownTask(ordinal))?;
        self.run(task, data)
    }

    /// Run both tasks in ordinal order, omitting tasks that are not implemented
    pub fn run_all(&self, data: &mut D::Data) -> BTreeMap<Task, TaskResult> {
        Task::ALL
            .into_iter()
            .filter_map(|task| self.run(task, data).ok().map(|r| (task, r)))
            .collect()
    }
}

/// Type-erased interface the registry and runner work with
///
/// Implemented for every [`DayInstance`], so days with different data types
/// can live in one registry.
pub trait DynDay {
    fn name(&self) -> &str;

    fn year(&self) -> u16;

    fn day_number(&self) -> Option<u8>;

    /// Folder holding the day's `input.txt` and `config.json`
    fn source_dir(&self) -> &Path;

    /// Identity of this day, failing if the day number cannot be derived
    fn id(&self) -> Result<DayId, RegistrationError> {
        self.day_number()
            .map(|day| DayId::new(self.year(), day))
            .ok_or_else(|| RegistrationError::InvalidDayName(self.name().to_string()))
    }

    /// Build the data package and run every implemented task, in ordinal order
    fn execute(&self, fetcher: &InputFetcher) -> Result<BTreeMap<Task, TaskResult>, DayError>;
}

impl<D: Day> DynDay for DayInstance<D> {
    fn name(&self) -> &str {
        self.day.name()
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day_number(&self) -> Option<u8> {
        self.day.day_number()
    }

    fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    fn execute(&self, fetcher: &InputFetcher) -> Result<BTreeMap<Task, TaskResult>, DayError> {
        let mut data = self.build_data_package(fetcher)?;
        Ok(self.run_all(&mut data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::INPUT_FILE_NAME;
    use crate::error::ParseError;
    use crate::FromInput;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    /// Sums numbers in task 2 only, task 1 is still open
    struct Day06 {
        calls: Cell<u32>,
    }

    impl Day for Day06 {
        type Data = Vec<String>;

        fn from_config(_config: &DayConfig) -> Result<Self, ConfigError> {
            Ok(Day06 { calls: Cell::new(0) })
        }

        fn run_t1(&self, _data: &mut Self::Data) -> Option<TaskResult> {
            self.calls.set(self.calls.get() + 1);
            None
        }

        fn run_t2(&self, data: &mut Self::Data) -> Option<TaskResult> {
            self.calls.set(self.calls.get() + 1);
            let sum: i64 = data.iter().filter_map(|l| l.trim().parse::<i64>().ok()).sum();
            Some(TaskResult::new(sum).with_log([format!("{} lines", data.len())]))
        }
    }

    #[derive(Debug)]
    struct Scan {
        numbers: Vec<u32>,
        max: Option<u32>,
    }

    impl FromInput for Scan {
        fn from_input(raw: &str) -> Result<Self, ParseError> {
            let numbers = raw
                .split_whitespace()
                .map(|t| {
                    t.parse()
                        .map_err(|_| ParseError::InvalidFormat(format!("not a number: {}", t)))
                })
                .collect::<Result<_, _>>()?;
            Ok(Scan { numbers, max: None })
        }
    }

    /// Task 1 leaves its maximum behind for task 2
    struct Day11;

    impl Day for Day11 {
        type Data = Scan;

        fn from_config(_config: &DayConfig) -> Result<Self, ConfigError> {
            Ok(Day11)
        }

        fn run_t1(&self, data: &mut Self::Data) -> Option<TaskResult> {
            let max = data.numbers.iter().copied().max().unwrap_or_default();
            data.max = Some(max);
            Some(TaskResult::new(max).with_duration(2.0))
        }

        fn run_t2(&self, data: &mut Self::Data) -> Option<TaskResult> {
            data.max.map(|max| TaskResult::new(max * 2))
        }
    }

    fn day06(dir: &Path) -> DayInstance<Day06> {
        DayInstance::new(Day06 { calls: Cell::new(0) }, 2023, dir)
    }

    #[test]
    fn test_run_all_omits_unimplemented_task() {
        let temp = TempDir::new().unwrap();
        let instance = day06(temp.path());
        let mut data = vec!["1".to_string(), "2".to_string()];

        let results = instance.run_all(&mut data);
        assert_eq!(results.len(), 1);
        assert!(results.contains_key(&Task::Task02));
        assert_eq!(results[&Task::Task02].result(), "3");
        assert_eq!(instance.day().calls.get(), 2);
    }

    #[test]
    fn test_run_reports_not_implemented() {
        let temp = TempDir::new().unwrap();
        let instance = day06(temp.path());
        let result = instance.run(Task::Task01, &mut Vec::new());
        assert!(matches!(
            result,
            Err(DayError::TaskNotImplemented(Task::Task01))
        ));
    }

    #[test]
    fn test_run_task_rejects_unknown_ordinal() {
        let temp = TempDir::new().unwrap();
        let instance = day06(temp.path());
        assert!(matches!(
            instance.run_task(3, &mut Vec::new()),
            Err(DayError::UnknownTask(3))
        ));
        assert!(instance.run_task(2, &mut Vec::new()).is_ok());
    }

    #[test]
    fn test_run_stamps_day_task_and_duration() {
        let temp = TempDir::new().unwrap();
        let instance = day06(temp.path());
        let result = instance.run(Task::Task02, &mut vec!["5".into()]).unwrap();

        let day = result.day().unwrap();
        assert_eq!(day.id, DayId::new(2023, 6));
        assert_eq!(day.name, "Day06");
        assert_eq!(result.task(), Some(Task::Task02));
        assert!(result.has_duration());
        assert_eq!(result.log_lines(), ["1 lines"]);
    }

    #[test]
    fn test_tasks_share_data_and_keep_own_duration() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(INPUT_FILE_NAME), "3 9 4").unwrap();
        let instance = DayInstance::new(Day11, 2022, temp.path());

        let results = instance.execute(&InputFetcher::offline()).unwrap();
        assert_eq!(results[&Task::Task01].result(), "9");
        assert_eq!(results[&Task::Task01].duration(), 2.0);
        assert_eq!(results[&Task::Task02].result(), "18");
    }

    #[test]
    fn test_build_data_package_propagates_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(INPUT_FILE_NAME), "3 x").unwrap();
        let instance = DayInstance::new(Day11, 2022, temp.path());

        assert!(matches!(
            instance.build_data_package(&InputFetcher::offline()),
            Err(DayError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_input_runs_on_empty_data() {
        let temp = TempDir::new().unwrap();
        let instance = day06(temp.path());
        let results = instance.execute(&InputFetcher::offline()).unwrap();
        assert_eq!(results[&Task::Task02].result(), "0");
    }

    #[test]
    fn test_from_config_takes_year() {
        let temp = TempDir::new().unwrap();
        let config = DayConfig::new(2017).with_session("abc");
        let instance = DayInstance::<Day11>::from_config(&config, temp.path()).unwrap();
        assert_eq!(instance.year(), 2017);
        assert_eq!(instance.id().unwrap(), DayId::new(2017, 11));
        assert_eq!(instance.source_dir(), temp.path());
    }
}
