//! Consolidation configuration.
//!
//! [`ConsolidationConfig`] holds the item ordering, container limits and
//! parallelism switch used by the engine.

use crate::container::ContainerLimits;
use crate::error::ConsolidationError;
use crate::ordering::SortSpec;

/// Configuration for the consolidation engine.
///
/// # Defaults
///
/// ```
/// use u_consolidate::consolidation::ConsolidationConfig;
/// use u_consolidate::ordering::SortSpec;
///
/// let config = ConsolidationConfig::default();
/// assert_eq!(config.sort, SortSpec::default());
/// assert_eq!(config.limits.max_volume, Some(70.0));
/// assert!(!config.parallel);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_consolidate::consolidation::ConsolidationConfig;
///
/// let config = ConsolidationConfig::default()
///     .with_sort_key("-total_weight")
///     .unwrap()
///     .with_max_volume(Some(60.0))
///     .with_ready_date_window_days(3);
/// assert!(config.validate().is_ok());
///
/// assert!(ConsolidationConfig::default().with_sort_key("weight").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsolidationConfig {
    /// Order of items within each route bucket.
    pub sort: SortSpec,

    /// Limits applied to every container.
    pub limits: ContainerLimits,

    /// Whether to consolidate route buckets in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature. Output order is the
    /// same either way.
    pub parallel: bool,
}

impl ConsolidationConfig {
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Parses and sets the sort key (`"ready_date"`, `"-total_weight"`, ...).
    pub fn with_sort_key(self, key: &str) -> Result<Self, ConsolidationError> {
        Ok(self.with_sort(key.parse()?))
    }

    pub fn with_limits(mut self, limits: ContainerLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the maximum container volume. `None` disables the check.
    pub fn with_max_volume(mut self, max_volume: Option<f64>) -> Self {
        self.limits.max_volume = max_volume;
        self
    }

    /// Sets the maximum container weight. `None` disables the check.
    pub fn with_max_weight(mut self, max_weight: Option<f64>) -> Self {
        self.limits.max_weight = max_weight;
        self
    }

    pub fn with_ready_date_window_days(mut self, days: u32) -> Self {
        self.limits.ready_date_window_days = days;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConsolidationError> {
        self.limits.validate()
    }
}
