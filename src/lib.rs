//! Route-aware shipment consolidation.
//!
//! Packs shippable line-items into transport containers:
//!
//! - **Item**: a validated shippable unit with a route, a ready date and
//!   physical dimensions. Raw text records are validated by [`item::ingest`].
//! - **Grouping**: items are partitioned by route (pickup, delivery).
//! - **Ordering**: each route bucket is sorted by one configurable key.
//! - **Consolidation**: first-fit greedy assignment into containers bounded
//!   by cumulative volume, cumulative weight and a ready-date window around
//!   each container's anchor (first) item.
//!
//! # Architecture
//!
//! ```text
//! RawRecord ──ingest──▶ Item ──RouteGrouper──▶ RouteBuckets
//!                                                  │ sort (SortSpec)
//!                                                  ▼
//!                        ConsolidationResult ◀── ConsolidationEngine
//! ```
//!
//! The engine is a pure in-memory transformation. It is not an optimal
//! bin-packer: containers are filled first-fit in creation order, and a
//! container is never rebalanced or merged with another one.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_consolidate::consolidation::{ConsolidationConfig, ConsolidationEngine};
//! use u_consolidate::item::{Item, RouteKey};
//!
//! let route = RouteKey::new("PickupA", "DeliverA").unwrap();
//! let day = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
//! let items = vec![
//!     Item::new(route.clone(), day).with_volume(40.0).unwrap(),
//!     Item::new(route, day).with_volume(40.0).unwrap(),
//! ];
//!
//! let engine = ConsolidationEngine::new(ConsolidationConfig::default()).unwrap();
//! let result = engine.run(items);
//! assert_eq!(result.containers.len(), 2);
//! ```

pub mod consolidation;
pub mod container;
pub mod error;
pub mod grouping;
pub mod item;
pub mod ordering;

pub use error::ConsolidationError;
