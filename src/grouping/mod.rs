//! Partitioning of items by route.
//!
//! [`RouteGrouper`] is a pure partition: it keys items by
//! (pickup, delivery) and keeps their relative input order inside each
//! bucket. Buckets come out in order of first appearance, which keeps
//! the engine's output order reproducible.
//!
//! The grouping is built and consumed within a single engine run; no
//! route state outlives the call.

mod grouper;

pub use grouper::{RouteBucket, RouteBuckets, RouteGrouper};
