//! Item ordering within a route bucket.
//!
//! Each bucket is sorted by one key before assignment. The first item in
//! sorted order anchors the first container, so the key decides which
//! items end up together. The conventional key is `ready_date`
//! ascending: every container then anchors on the earliest pending date.
//!
//! Keys are parsed from text (`"ready_date"`, `"-total_weight"`): a
//! leading `-` requests descending order. Unknown keys fail fast with
//! [`ConsolidationError::InvalidSortKey`](crate::ConsolidationError).
//!
//! Sorting is stable in both directions. Items with equal keys keep
//! their input order.

mod key;

pub use key::{SortKey, SortOrder, SortSpec};
