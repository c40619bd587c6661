//! Container aggregate and its admission rules.

use crate::error::ConsolidationError;
use crate::item::{Item, RouteKey};
use chrono::NaiveDate;
use tracing::trace;

/// Capacity and ready-date limits applied to every container.
///
/// A `None` capacity disables that check.
///
/// # Examples
///
/// ```
/// use u_consolidate::container::ContainerLimits;
///
/// let limits = ContainerLimits::default();
/// assert_eq!(limits.max_volume, Some(70.0));
/// assert_eq!(limits.max_weight, Some(1500.0));
/// assert_eq!(limits.ready_date_window_days, 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerLimits {
    /// Maximum cumulative volume.
    pub max_volume: Option<f64>,

    /// Maximum cumulative weight.
    pub max_weight: Option<f64>,

    /// Inclusive distance in days allowed between an item's ready date
    /// and the container's anchor date, in either direction.
    pub ready_date_window_days: u32,
}

impl Default for ContainerLimits {
    fn default() -> Self {
        Self {
            max_volume: Some(Self::MAX_VOLUME),
            max_weight: Some(Self::MAX_WEIGHT),
            ready_date_window_days: Self::READY_DATE_WINDOW_DAYS,
        }
    }
}

impl ContainerLimits {
    pub const MAX_VOLUME: f64 = 70.0;
    pub const MAX_WEIGHT: f64 = 1500.0;
    pub const READY_DATE_WINDOW_DAYS: u32 = 7;

    /// Limits with no capacity bound and the given window.
    pub fn unbounded(ready_date_window_days: u32) -> Self {
        Self {
            max_volume: None,
            max_weight: None,
            ready_date_window_days,
        }
    }

    pub fn with_max_volume(mut self, max_volume: Option<f64>) -> Self {
        self.max_volume = max_volume;
        self
    }

    pub fn with_max_weight(mut self, max_weight: Option<f64>) -> Self {
        self.max_weight = max_weight;
        self
    }

    pub fn with_ready_date_window_days(mut self, days: u32) -> Self {
        self.ready_date_window_days = days;
        self
    }

    /// Validates the limits.
    pub fn validate(&self) -> Result<(), ConsolidationError> {
        for (name, limit) in [
            ("max_volume", self.max_volume),
            ("max_weight", self.max_weight),
        ] {
            if let Some(value) = limit {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ConsolidationError::InvalidLimit { name, value });
                }
            }
        }
        Ok(())
    }
}

/// Why a container refused an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRejection {
    /// The item travels on another route.
    RouteMismatch,
    /// Cumulative volume would exceed the limit.
    Volume,
    /// Cumulative weight would exceed the limit.
    Weight,
    /// The item's ready date is outside the anchor window.
    ReadyDateWindow,
}

/// An append-only group of items on one route.
///
/// Invariants after every successful merge:
///
/// - every item shares the container's route;
/// - totals stay within [`ContainerLimits`];
/// - every ready date lies within the window around the anchor date.
#[derive(Debug, Clone)]
pub struct Container {
    route: RouteKey,
    limits: ContainerLimits,
    total_volume: f64,
    total_weight: f64,
    ready_date: NaiveDate,
    items: Vec<Item>,
}

impl Container {
    /// Opens a container anchored on `item`.
    ///
    /// The first item is always accepted, even if it alone exceeds the
    /// capacity limits: it has nowhere else to go.
    pub fn new(item: Item, limits: ContainerLimits) -> Self {
        Self {
            route: item.route().clone(),
            limits,
            total_volume: item.total_volume(),
            total_weight: item.total_weight(),
            ready_date: item.ready_date(),
            items: vec![item],
        }
    }

    /// Checks whether `item` could be merged, without merging it.
    ///
    /// All constraints are evaluated against the totals the container
    /// would have after the merge.
    pub fn admits(&self, item: &Item) -> Result<(), MergeRejection> {
        if item.route() != &self.route {
            return Err(MergeRejection::RouteMismatch);
        }
        if exceeds(self.total_volume, item.total_volume(), self.limits.max_volume) {
            return Err(MergeRejection::Volume);
        }
        if exceeds(self.total_weight, item.total_weight(), self.limits.max_weight) {
            return Err(MergeRejection::Weight);
        }
        if !self.within_window(item.ready_date()) {
            return Err(MergeRejection::ReadyDateWindow);
        }
        Ok(())
    }

    /// Merges `item` if every constraint holds.
    ///
    /// The decision is atomic: on refusal the container is untouched and
    /// the item is handed back so the caller can try the next container.
    pub fn try_merge(&mut self, item: Item) -> Result<(), Item> {
        if let Err(reason) = self.admits(&item) {
            trace!(route = %self.route, ?reason, "container refused item");
            return Err(item);
        }
        self.total_volume += item.total_volume();
        self.total_weight += item.total_weight();
        self.items.push(item);
        Ok(())
    }

    pub fn route(&self) -> &RouteKey {
        &self.route
    }

    pub fn pickup_location(&self) -> &str {
        self.route.pickup_location()
    }

    pub fn deliver_to_location(&self) -> &str {
        self.route.deliver_to_location()
    }

    pub fn total_volume(&self) -> f64 {
        self.total_volume
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// The anchor date: ready date of the first item.
    pub fn ready_date(&self) -> NaiveDate {
        self.ready_date
    }

    /// Supplier of the anchor item. Informational only.
    pub fn supplier(&self) -> &str {
        self.items.first().map(Item::supplier).unwrap_or_default()
    }

    /// Items in assignment order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn limits(&self) -> &ContainerLimits {
        &self.limits
    }

    pub(crate) fn into_parts(self) -> (RouteKey, f64, f64, NaiveDate, Vec<Item>) {
        (
            self.route,
            self.total_volume,
            self.total_weight,
            self.ready_date,
            self.items,
        )
    }

    fn within_window(&self, ready_date: NaiveDate) -> bool {
        let distance = (ready_date - self.ready_date).num_days().unsigned_abs();
        distance <= u64::from(self.limits.ready_date_window_days)
    }
}

fn exceeds(current: f64, incoming: f64, limit: Option<f64>) -> bool {
    match limit {
        Some(limit) => current + incoming > limit,
        None => false,
    }
}
