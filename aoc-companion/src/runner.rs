//! Discovers days and runs their tasks in order

use crate::config::DayConfig;
use crate::day::DayId;
use crate::error::{DayError, DiscoveryError, RegistrationError};
use crate::input::InputFetcher;
use crate::instance::DynDay;
use crate::registry::{DayPlugin, DayRegistry, plugins};
use crate::result::TaskResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// File marking a folder as a day module
pub const MODULE_FILE_NAME: &str = "mod.rs";

/// Top-level orchestrator for one year
///
/// Owns the [`DayRegistry`] and the [`InputFetcher`]. Days run strictly one
/// after another, in ascending day order, tasks in ascending ordinal order.
///
/// # Example
///
/// ```no_run
/// use aoc_companion::{InputFetcher, Runner, format_results};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut runner = Runner::new(2023, InputFetcher::offline());
/// runner.discover("aoc-solutions/src/year_2023")?;
/// let results = runner.run_latest()?;
/// println!("{}", format_results(&results, true));
/// # Ok(())
/// # }
/// ```
pub struct Runner {
    year: u16,
    registry: DayRegistry,
    fetcher: InputFetcher,
    strict: bool,
}

impl Runner {
    /// Create a runner for `year` with an empty registry
    pub fn new(year: u16, fetcher: InputFetcher) -> Self {
        Self {
            year,
            registry: DayRegistry::new(),
            fetcher,
            strict: false,
        }
    }

    /// Fail discovery on day folders without a matching plugin instead of
    /// logging and skipping them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn registry(&self) -> &DayRegistry {
        &self.registry
    }

    /// Register a day constructed outside of discovery
    pub fn register(&mut self, day: Box<dyn DynDay>) -> Result<DayId, RegistrationError> {
        self.registry.register(day)
    }

    /// Registered days of the runner's year, ordered by day number
    pub fn days(&self) -> impl Iterator<Item = &dyn DynDay> + '_ {
        self.registry.for_year(self.year)
    }

    /// Discover days in `source_folder` using every linked plugin
    ///
    /// See [`Runner::discover_with`].
    pub fn discover(
        &mut self,
        source_folder: impl AsRef<Path>,
    ) -> Result<Vec<DayId>, DiscoveryError> {
        self.discover_with(source_folder, plugins())
    }

    /// Discover days in `source_folder` from the given plugins
    ///
    /// Every immediate subfolder holding a `mod.rs` is a day folder. Its
    /// `config.json` is merged over `{"year": <runner year>}` and handed to
    /// the plugin whose module name equals the folder name. The new day is
    /// registered with the folder as its input location.
    ///
    /// A day folder without a matching plugin is logged and skipped, or fails
    /// discovery in strict mode.
    ///
    /// # Returns
    /// Identities of the registered days, in folder name order.
    pub fn discover_with<'p>(
        &mut self,
        source_folder: impl AsRef<Path>,
        plugins: impl IntoIterator<Item = &'p DayPlugin>,
    ) -> Result<Vec<DayId>, DiscoveryError> {
        let source = source_folder.as_ref();
        let plugins: Vec<&DayPlugin> = plugins.into_iter().collect();
        let parent_segment = source.file_name().and_then(|n| n.to_str());

        let mut folders: Vec<PathBuf> = fs::read_dir(source)
            .map_err(|e| DiscoveryError::ReadDir {
                path: source.to_path_buf(),
                source: e,
            })?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        folders.sort();

        let mut found = Vec::new();
        for folder in folders {
            if !folder.join(MODULE_FILE_NAME).is_file() {
                continue;
            }
            let Some(folder_name) = folder.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let Some(plugin) = find_plugin(&plugins, folder_name, parent_segment) else {
                if self.strict {
                    return Err(DiscoveryError::MissingDay { folder });
                }
                error!(
                    folder = %folder.display(),
                    "Found day module but no day registered for it, \
                     check that the day derives AocDay inside module `{}`",
                    folder_name
                );
                continue;
            };

            let config = DayConfig::load(&folder, self.year).map_err(|source| {
                DiscoveryError::Config {
                    folder: folder.clone(),
                    source,
                }
            })?;
            let day = plugin
                .create(&config, &folder)
                .map_err(|source| DiscoveryError::Config {
                    folder: folder.clone(),
                    source,
                })?;
            let id = self.registry.register(day)?;
            debug!(%id, plugin = plugin.name, folder = %folder.display(), "Discovered day");
            found.push(id);
        }
        Ok(found)
    }

    /// Run the given days of the runner's year, or every registered day when
    /// `days` is empty
    ///
    /// Days that are not registered are skipped. Results come ordered by day
    /// number, then task ordinal.
    ///
    /// # Errors
    ///
    /// The first day whose input cannot be read or preprocessed aborts the run.
    pub fn run(&self, days: &[u8]) -> Result<Vec<TaskResult>, DayError> {
        let mut selected: Vec<u8> = if days.is_empty() {
            self.days().filter_map(|d| d.day_number()).collect()
        } else {
            days.to_vec()
        };
        selected.sort_unstable();
        selected.dedup();

        let total = selected.len();
        let mut results = Vec::new();
        for (index, day_number) in selected.into_iter().enumerate() {
            let day = match self.registry.lookup(self.year, day_number) {
                Ok(day) => day,
                Err(e) => {
                    debug!(error = %e, "Skipping day");
                    continue;
                }
            };

            info!(
                year = self.year,
                day = day_number,
                progress = %format!("{}/{}", index + 1, total),
                "Running {}",
                day.name()
            );
            results.extend(day.execute(&self.fetcher)?.into_values());
        }
        Ok(results)
    }

    /// Run the day with the highest day number registered for the year
    pub fn run_latest(&self) -> Result<Vec<TaskResult>, DayError> {
        match self.registry.latest(self.year).and_then(|d| d.day_number()) {
            Some(day) => self.run(&[day]),
            None => Ok(Vec::new()),
        }
    }
}

/// Prefix of module segments that group days by year
pub const YEAR_MODULE_PREFIX: &str = "year_";

/// Plugin for a day folder
///
/// A plugin whose module path also contains the source folder's name wins
/// (`year_2023::day01` for `.../year_2023/day01`). Otherwise a lone candidate
/// is accepted only if its module path names no year module, so a folder of
/// one year never picks up another year's day.
fn find_plugin<'p>(
    plugins: &[&'p DayPlugin],
    folder_name: &str,
    parent_segment: Option<&str>,
) -> Option<&'p DayPlugin> {
    let candidates: Vec<&DayPlugin> = plugins
        .iter()
        .copied()
        .filter(|p| p.module_name() == folder_name)
        .collect();

    if let Some(exact) = candidates
        .iter()
        .copied()
        .find(|p| parent_segment.is_some_and(|seg| p.has_module_segment(seg)))
    {
        return Some(exact);
    }

    match candidates.as_slice() {
        [only] if !names_year_module(only) => Some(*only),
        _ => None,
    }
}

fn names_year_module(plugin: &DayPlugin) -> bool {
    plugin
        .module_path
        .split("::")
        .any(|segment| segment.starts_with(YEAR_MODULE_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::INPUT_FILE_NAME;
    use crate::config::CONFIG_FILE_NAME;
    use crate::day::Day;
    use crate::error::ConfigError;
    use crate::instance::DayInstance;
    use crate::registry::instantiate;
    use crate::result::Task;
    use tempfile::TempDir;

    /// Counts lines, task 2 multiplies by a configured factor
    struct Day01 {
        factor: i64,
    }

    impl Day for Day01 {
        type Data = Vec<String>;

        fn from_config(config: &DayConfig) -> Result<Self, ConfigError> {
            let factor = config.setting("factor").and_then(|v| v.as_i64()).unwrap_or(1);
            Ok(Day01 { factor })
        }

        fn run_t1(&self, data: &mut Self::Data) -> Option<TaskResult> {
            Some(TaskResult::new(data.len()))
        }

        fn run_t2(&self, data: &mut Self::Data) -> Option<TaskResult> {
            Some(TaskResult::new(data.len() as i64 * self.factor))
        }
    }

    /// Only the first task is done
    struct Day02;

    impl Day for Day02 {
        type Data = String;

        fn from_config(_config: &DayConfig) -> Result<Self, ConfigError> {
            Ok(Day02)
        }

        fn run_t1(&self, data: &mut Self::Data) -> Option<TaskResult> {
            Some(TaskResult::new(data.trim().chars().rev().collect::<String>()))
        }

        fn run_t2(&self, _data: &mut Self::Data) -> Option<TaskResult> {
            None
        }
    }

    static TEST_PLUGINS: [DayPlugin; 2] = [
        DayPlugin {
            name: "Day01",
            module_path: "tests::days::day01",
            factory: instantiate::<Day01>,
        },
        DayPlugin {
            name: "Day02",
            module_path: "tests::days::day02",
            factory: instantiate::<Day02>,
        },
    ];

    fn day_folder(root: &Path, name: &str, input: Option<&str>, config: Option<&str>) -> PathBuf {
        let folder = root.join(name);
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join(MODULE_FILE_NAME), "").unwrap();
        if let Some(input) = input {
            fs::write(folder.join(INPUT_FILE_NAME), input).unwrap();
        }
        if let Some(config) = config {
            fs::write(folder.join(CONFIG_FILE_NAME), config).unwrap();
        }
        folder
    }

    #[test]
    fn test_discover_registers_matching_folders() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("year_2023");
        day_folder(&root, "day01", None, None);
        day_folder(&root, "day02", None, None);
        fs::create_dir_all(root.join("utils")).unwrap();
        fs::write(root.join("mod.rs"), "").unwrap();

        let mut runner = Runner::new(2023, InputFetcher::offline());
        let found = runner.discover_with(&root, &TEST_PLUGINS).unwrap();

        assert_eq!(found, [DayId::new(2023, 1), DayId::new(2023, 2)]);
        assert_eq!(
            runner.registry().lookup(2023, 2).unwrap().source_dir(),
            root.join("day02")
        );
    }

    #[test]
    fn test_discover_skips_folder_without_plugin() {
        let temp = TempDir::new().unwrap();
        day_folder(temp.path(), "day01", None, None);
        day_folder(temp.path(), "day09", None, None);

        let mut runner = Runner::new(2023, InputFetcher::offline());
        let found = runner.discover_with(temp.path(), &TEST_PLUGINS).unwrap();
        assert_eq!(found, [DayId::new(2023, 1)]);
    }

    #[test]
    fn test_strict_discovery_fails_on_missing_plugin() {
        let temp = TempDir::new().unwrap();
        day_folder(temp.path(), "day09", None, None);

        let mut runner = Runner::new(2023, InputFetcher::offline()).strict(true);
        let result = runner.discover_with(temp.path(), &TEST_PLUGINS);
        assert!(matches!(
            result,
            Err(DiscoveryError::MissingDay { folder }) if folder.ends_with("day09")
        ));
    }

    #[test]
    fn test_discover_missing_folder_fails() {
        let temp = TempDir::new().unwrap();
        let mut runner = Runner::new(2023, InputFetcher::offline());
        let result = runner.discover_with(temp.path().join("nope"), &TEST_PLUGINS);
        assert!(matches!(result, Err(DiscoveryError::ReadDir { .. })));
    }

    #[test]
    fn test_config_reaches_day_and_can_override_year() {
        let temp = TempDir::new().unwrap();
        day_folder(temp.path(), "day01", Some("a\nb\nc"), Some(r#"{"factor": 10}"#));
        day_folder(temp.path(), "day02", None, Some(r#"{"year": 2015}"#));

        let mut runner = Runner::new(2023, InputFetcher::offline());
        let found = runner.discover_with(temp.path(), &TEST_PLUGINS).unwrap();
        assert_eq!(found, [DayId::new(2023, 1), DayId::new(2015, 2)]);

        let results = runner.run(&[]).unwrap();
        let values: Vec<_> = results.iter().map(|r| r.result()).collect();
        assert_eq!(values, ["3", "30"]);
    }

    #[test]
    fn test_invalid_config_fails_discovery() {
        let temp = TempDir::new().unwrap();
        day_folder(temp.path(), "day01", None, Some("not json"));

        let mut runner = Runner::new(2023, InputFetcher::offline());
        let result = runner.discover_with(temp.path(), &TEST_PLUGINS);
        assert!(matches!(result, Err(DiscoveryError::Config { .. })));
    }

    #[test]
    fn test_run_orders_by_day_then_task_and_skips_unknown_days() {
        let temp = TempDir::new().unwrap();
        day_folder(temp.path(), "day01", Some("x\ny"), None);
        day_folder(temp.path(), "day02", Some("abc\n"), None);

        let mut runner = Runner::new(2023, InputFetcher::offline());
        runner.discover_with(temp.path(), &TEST_PLUGINS).unwrap();

        let results = runner.run(&[2, 17, 1]).unwrap();
        let keys: Vec<_> = results
            .iter()
            .map(|r| (r.day().unwrap().id.day, r.task().unwrap()))
            .collect();
        assert_eq!(
            keys,
            [(1, Task::Task01), (1, Task::Task02), (2, Task::Task01)]
        );
        assert_eq!(results[2].result(), "cba");
        assert!(results.iter().all(|r| r.has_duration()));
    }

    #[test]
    fn test_run_latest() {
        let temp = TempDir::new().unwrap();
        day_folder(temp.path(), "day01", Some("1"), None);
        day_folder(temp.path(), "day02", Some("xyz"), None);

        let mut runner = Runner::new(2023, InputFetcher::offline());
        assert!(runner.run_latest().unwrap().is_empty());

        runner.discover_with(temp.path(), &TEST_PLUGINS).unwrap();
        let results = runner.run_latest().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].day().unwrap().name, "Day02");
        assert_eq!(results[0].result(), "zyx");
    }

    #[test]
    fn test_run_ignores_other_years() {
        let temp = TempDir::new().unwrap();
        let mut runner = Runner::new(2023, InputFetcher::offline());
        runner
            .register(Box::new(DayInstance::new(Day02, 2022, temp.path())))
            .unwrap();

        assert!(runner.run(&[]).unwrap().is_empty());
        assert!(runner.run(&[2]).unwrap().is_empty());
        assert_eq!(runner.registry().len(), 1);
    }

    #[test]
    fn test_find_plugin_prefers_parent_segment() {
        static PLUGINS: [DayPlugin; 3] = [
            DayPlugin {
                name: "Day01",
                module_path: "sol::year_2022::day01",
                factory: instantiate::<Day01>,
            },
            DayPlugin {
                name: "Day01",
                module_path: "sol::year_2023::day01",
                factory: instantiate::<Day01>,
            },
            DayPlugin {
                name: "Day02",
                module_path: "sol::days::day02",
                factory: instantiate::<Day02>,
            },
        ];
        let plugins: Vec<&DayPlugin> = PLUGINS.iter().collect();

        let chosen = find_plugin(&plugins, "day01", Some("year_2023")).unwrap();
        assert_eq!(chosen.module_path, "sol::year_2023::day01");
        assert!(find_plugin(&plugins, "day01", Some("elsewhere")).is_none());
        assert!(find_plugin(&plugins, "day01", Some("year_2024")).is_none());

        let lone = find_plugin(&plugins, "day02", Some("year_2024")).unwrap();
        assert_eq!(lone.module_path, "sol::days::day02");
        assert!(find_plugin(&plugins, "day03", None).is_none());
    }

    #[test]
    fn test_other_year_day_is_never_bound() {
        static PLUGINS: [DayPlugin; 1] = [DayPlugin {
            name: "Day01",
            module_path: "sol::year_2023::day01",
            factory: instantiate::<Day01>,
        }];
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("year_2024");
        day_folder(&root, "day01", Some("input of 2024"), None);

        let mut strict = Runner::new(2024, InputFetcher::offline()).strict(true);
        let result = strict.discover_with(&root, &PLUGINS);
        assert!(matches!(
            result,
            Err(DiscoveryError::MissingDay { folder }) if folder.ends_with("day01")
        ));
        assert!(strict.registry().is_empty());

        let mut lenient = Runner::new(2024, InputFetcher::offline());
        assert!(lenient.discover_with(&root, &PLUGINS).unwrap().is_empty());
        assert!(lenient.run(&[]).unwrap().is_empty());
    }
}
