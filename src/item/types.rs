//! Item and route key value types.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Why a record could not become an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ValidationError {
    #[error("pickup location cannot be empty")]
    MissingPickupLocation,

    #[error("deliver-to location cannot be empty")]
    MissingDeliverToLocation,

    #[error("ready date cannot be empty")]
    MissingReadyDate,

    /// The ready date does not match the expected textual format.
    #[error("ready date `{value}` is not a valid month/day/year date")]
    InvalidReadyDate { value: String },

    /// A volume or weight is not a finite, non-negative number.
    #[error("{field} `{value}` must be a finite number >= 0")]
    InvalidQuantity { field: &'static str, value: String },
}

/// A shipping lane: (pickup location, deliver-to location).
///
/// Both locations are non-empty. Items and containers on different routes
/// never interact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RouteKeyRepr"))]
pub struct RouteKey {
    pickup_location: String,
    deliver_to_location: String,
}

impl RouteKey {
    /// Creates a route key, rejecting empty (or blank) locations.
    pub fn new(
        pickup_location: impl Into<String>,
        deliver_to_location: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let pickup_location = pickup_location.into();
        let deliver_to_location = deliver_to_location.into();
        if pickup_location.trim().is_empty() {
            return Err(ValidationError::MissingPickupLocation);
        }
        if deliver_to_location.trim().is_empty() {
            return Err(ValidationError::MissingDeliverToLocation);
        }
        Ok(Self {
            pickup_location,
            deliver_to_location,
        })
    }

    pub fn pickup_location(&self) -> &str {
        &self.pickup_location
    }

    pub fn deliver_to_location(&self) -> &str {
        &self.deliver_to_location
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.pickup_location, self.deliver_to_location)
    }
}

/// One shippable unit.
///
/// Built once per input record and read-only afterwards. Volume and weight
/// default to zero and are always finite and non-negative.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_consolidate::item::{Item, RouteKey};
///
/// let route = RouteKey::new("PickupA", "DeliverA").unwrap();
/// let ready = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
/// let item = Item::new(route, ready)
///     .with_supplier("Supplier 1")
///     .with_volume(15.0)
///     .and_then(|item| item.with_weight(200.0))
///     .unwrap();
///
/// assert_eq!(item.supplier(), "Supplier 1");
/// assert_eq!(item.total_weight(), 200.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ItemRepr"))]
pub struct Item {
    route: RouteKey,
    supplier: String,
    total_volume: f64,
    total_weight: f64,
    ready_date: NaiveDate,
}

impl Item {
    /// Creates an item with no supplier and zero volume and weight.
    pub fn new(route: RouteKey, ready_date: NaiveDate) -> Self {
        Self {
            route,
            supplier: String::new(),
            total_volume: 0.0,
            total_weight: 0.0,
            ready_date,
        }
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    /// Sets the volume. Fails on negative or non-finite values.
    pub fn with_volume(mut self, volume: f64) -> Result<Self, ValidationError> {
        self.total_volume = checked_quantity("total_volume", volume)?;
        Ok(self)
    }

    /// Sets the weight. Fails on negative or non-finite values.
    pub fn with_weight(mut self, weight: f64) -> Result<Self, ValidationError> {
        self.total_weight = checked_quantity("total_weight", weight)?;
        Ok(self)
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

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn total_volume(&self) -> f64 {
        self.total_volume
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn ready_date(&self) -> NaiveDate {
        self.ready_date
    }
}

/// Unvalidated wire form of [`RouteKey`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RouteKeyRepr {
    pickup_location: String,
    deliver_to_location: String,
}

#[cfg(feature = "serde")]
impl TryFrom<RouteKeyRepr> for RouteKey {
    type Error = ValidationError;

    fn try_from(repr: RouteKeyRepr) -> Result<Self, Self::Error> {
        RouteKey::new(repr.pickup_location, repr.deliver_to_location)
    }
}

/// Unvalidated wire form of [`Item`]. Deserialized items go through the
/// same checks as the builder.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ItemRepr {
    route: RouteKey,
    #[serde(default)]
    supplier: String,
    #[serde(default)]
    total_volume: f64,
    #[serde(default)]
    total_weight: f64,
    ready_date: NaiveDate,
}

#[cfg(feature = "serde")]
impl TryFrom<ItemRepr> for Item {
    type Error = ValidationError;

    fn try_from(repr: ItemRepr) -> Result<Self, Self::Error> {
        Item::new(repr.route, repr.ready_date)
            .with_supplier(repr.supplier)
            .with_volume(repr.total_volume)?
            .with_weight(repr.total_weight)
    }
}

pub(crate) fn checked_quantity(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value >= 0.0 {
        // normalizes -0.0
        Ok(value + 0.0)
    } else {
        Err(ValidationError::InvalidQuantity {
            field,
            value: value.to_string(),
        })
    }
}
