//! Read-only container records for output.

use super::types::Container;
use crate::item::{Item, RouteKey};
use chrono::NaiveDate;

/// Final, immutable view of a container.
///
/// Produced by consuming a [`Container`], so nothing downstream of the
/// engine can mutate the aggregate. Output only: it serializes but cannot be
/// deserialized, since its totals would not be checked against its items.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContainerSnapshot {
    pub route: RouteKey,
    pub total_volume: f64,
    pub total_weight: f64,
    /// Supplier of the anchor item.
    pub supplier: String,
    /// Anchor date.
    pub ready_date: NaiveDate,
    /// Items in assignment order.
    pub items: Vec<Item>,
}

impl ContainerSnapshot {
    pub fn pickup_location(&self) -> &str {
        self.route.pickup_location()
    }

    pub fn deliver_to_location(&self) -> &str {
        self.route.deliver_to_location()
    }
}

impl From<Container> for ContainerSnapshot {
    fn from(container: Container) -> Self {
        let supplier = container.supplier().to_string();
        let (route, total_volume, total_weight, ready_date, items) = container.into_parts();
        Self {
            route,
            total_volume,
            total_weight,
            supplier,
            ready_date,
            items,
        }
    }
}
