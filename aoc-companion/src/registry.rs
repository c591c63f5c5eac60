//! Day registry and the plugin manifest days are discovered from

use crate::config::DayConfig;
use crate::day::{Day, DayId};
use crate::error::{ConfigError, LookupError, RegistrationError};
use crate::instance::{DayInstance, DynDay};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

// ============================================================================
// Plugin Manifest
// ============================================================================

/// Factory constructing a day from its merged configuration and folder
pub type DayFactory = fn(&DayConfig, &Path) -> Result<Box<dyn DynDay>, ConfigError>;

/// Factory for any [`Day`], usable as a [`DayFactory`] function pointer
pub fn instantiate<D: Day>(
    config: &DayConfig,
    folder: &Path,
) -> Result<Box<dyn DynDay>, ConfigError> {
    Ok(Box::new(DayInstance::<D>::from_config(config, folder)?))
}

/// Plugin information for automatic day discovery
///
/// Usually submitted by `#[derive(AocDay)]`; the runner matches the last
/// segment of `module_path` against day folder names.
///
/// # Example
///
/// ```no_run
/// use aoc_companion::{ConfigError, Day, DayConfig, DayPlugin, TaskResult, instantiate};
///
/// pub struct Day01;
///
/// impl Day for Day01 {
///     type Data = Vec<String>;
///
///     fn from_config(_: &DayConfig) -> Result<Self, ConfigError> {
///         Ok(Day01)
///     }
///
///     fn run_t1(&self, data: &mut Self::Data) -> Option<TaskResult> {
///         Some(TaskResult::new(data.len()))
///     }
///
///     fn run_t2(&self, _: &mut Self::Data) -> Option<TaskResult> {
///         None
///     }
/// }
///
/// aoc_companion::inventory::submit! {
///     DayPlugin {
///         name: "Day01",
///         module_path: "my_solutions::year_2023::day01",
///         factory: instantiate::<Day01>,
///     }
/// }
/// # fn main() {}
/// ```
pub struct DayPlugin {
    /// Declared name of the day type
    pub name: &'static str,
    /// `module_path!()` of the module defining the day
    pub module_path: &'static str,
    /// Constructor for the day
    pub factory: DayFactory,
}

impl DayPlugin {
    /// Last segment of the module path, the folder name the day lives in
    pub fn module_name(&self) -> &'static str {
        self.module_path
            .rsplit("::")
            .next()
            .unwrap_or(self.module_path)
    }

    /// Whether `module_path` contains `segment` as a whole path segment
    pub fn has_module_segment(&self, segment: &str) -> bool {
        self.module_path.split("::").any(|s| s == segment)
    }

    pub fn create(
        &self,
        config: &DayConfig,
        folder: &Path,
    ) -> Result<Box<dyn DynDay>, ConfigError> {
        (self.factory)(config, folder)
    }
}

inventory::collect!(DayPlugin);

/// All plugins linked into the binary
pub fn plugins() -> impl Iterator<Item = &'static DayPlugin> {
    inventory::iter::<DayPlugin>.into_iter()
}

// ============================================================================
// Registry
// ============================================================================

/// Mapping from (year, day) to the registered day
///
/// Owned by the runner. Iteration is always in ascending (year, day) order.
/// Registering a second day with the same identity replaces the first.
#[derive(Default)]
pub struct DayRegistry {
    days: BTreeMap<DayId, Box<dyn DynDay>>,
}

impl DayRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a day under its (year, day number) identity
    ///
    /// # Errors
    ///
    /// `RegistrationError::InvalidDayName` if the day number cannot be derived
    /// from the day's name.
    pub fn register(&mut self, day: Box<dyn DynDay>) -> Result<DayId, RegistrationError> {
        let id = day.id()?;
        if let Some(previous) = self.days.insert(id, day) {
            debug!(%id, replaced = previous.name(), "Replaced registered day");
        } else {
            debug!(%id, "Registered day");
        }
        Ok(id)
    }

    /// Look up the day registered for a year and day number
    pub fn lookup(&self, year: u16, day: u8) -> Result<&dyn DynDay, LookupError> {
        self.days
            .get(&DayId::new(year, day))
            .map(|d| d.as_ref())
            .ok_or(LookupError::NotFound(year, day))
    }

    /// All registered days, ordered by year then day number
    pub fn all(&self) -> impl Iterator<Item = &dyn DynDay> + '_ {
        self.days.values().map(|d| d.as_ref())
    }

    /// Registered days of one year, ordered by day number
    pub fn for_year(&self, year: u16) -> impl Iterator<Item = &dyn DynDay> + '_ {
        self.days
            .range(DayId::new(year, u8::MIN)..=DayId::new(year, u8::MAX))
            .map(|(_, d)| d.as_ref())
    }

    /// Day with the highest day number registered for a year
    pub fn latest(&self, year: u16) -> Option<&dyn DynDay> {
        self.for_year(year).last()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
