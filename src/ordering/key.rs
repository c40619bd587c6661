//! Sort key and direction.

use crate::error::ConsolidationError;
use crate::item::Item;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Item field used to order a route bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SortKey {
    #[default]
    ReadyDate,
    Supplier,
    TotalVolume,
    TotalWeight,
}

impl SortKey {
    /// Accepted textual names, in declaration order.
    pub const NAMES: &'static [&'static str] =
        &["ready_date", "supplier", "total_volume", "total_weight"];

    pub fn name(&self) -> &'static str {
        match self {
            SortKey::ReadyDate => "ready_date",
            SortKey::Supplier => "supplier",
            SortKey::TotalVolume => "total_volume",
            SortKey::TotalWeight => "total_weight",
        }
    }

    /// Compares two items on this key, ascending.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        match self {
            SortKey::ReadyDate => a.ready_date().cmp(&b.ready_date()),
            SortKey::Supplier => a.supplier().cmp(b.supplier()),
            SortKey::TotalVolume => a.total_volume().total_cmp(&b.total_volume()),
            SortKey::TotalWeight => a.total_weight().total_cmp(&b.total_weight()),
        }
    }
}

impl FromStr for SortKey {
    type Err = ConsolidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready_date" => Ok(SortKey::ReadyDate),
            "supplier" => Ok(SortKey::Supplier),
            "total_volume" => Ok(SortKey::TotalVolume),
            "total_weight" => Ok(SortKey::TotalWeight),
            other => Err(ConsolidationError::InvalidSortKey {
                key: other.to_string(),
                allowed: Self::NAMES,
            }),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A sort key plus its direction.
///
/// # Examples
///
/// ```
/// use u_consolidate::ordering::{SortKey, SortOrder, SortSpec};
///
/// let spec: SortSpec = "-total_weight".parse().unwrap();
/// assert_eq!(spec.key, SortKey::TotalWeight);
/// assert_eq!(spec.order, SortOrder::Descending);
/// assert_eq!(spec.to_string(), "-total_weight");
///
/// assert!("volume".parse::<SortSpec>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            order: SortOrder::Descending,
        }
    }

    /// Compares two items in this spec's direction.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        match self.order {
            SortOrder::Ascending => self.key.compare(a, b),
            SortOrder::Descending => self.key.compare(b, a),
        }
    }

    /// Sorts `items` in place. Stable: ties keep their input order.
    pub fn sort(&self, items: &mut [Item]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

impl FromStr for SortSpec {
    type Err = ConsolidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('-') {
            Some(key) => Ok(Self::descending(key.parse()?)),
            None => Ok(Self::ascending(s.parse()?)),
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.order == SortOrder::Descending {
            f.write_str("-")?;
        }
        f.write_str(self.key.name())
    }
}
