//! Transport containers.
//!
//! A [`Container`] is an append-only aggregate of items sharing one route.
//! It keeps running volume/weight totals and an anchor date (the ready date
//! of its first item) that fixes the window later items must fall into.
//!
//! Admission is an expected, frequent decision, so [`Container::try_merge`]
//! returns the refused item instead of raising an error. A container is
//! never split, rebalanced or merged with another container.

mod snapshot;
mod types;

pub use snapshot::ContainerSnapshot;
pub use types::{Container, ContainerLimits, MergeRejection};
