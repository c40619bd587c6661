//! Configuration errors.

use thiserror::Error;

/// Errors surfaced to the caller of the consolidation engine.
///
/// Only configuration problems are reported here. Malformed records are
/// skipped during ingestion and capacity or window refusals are resolved
/// inside the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsolidationError {
    /// The sort key is not one of the supported item fields.
    #[error("sort key `{key}` must be one of {allowed:?}")]
    InvalidSortKey {
        key: String,
        allowed: &'static [&'static str],
    },

    /// A capacity limit is not a finite positive number.
    #[error("{name} must be finite and positive, got {value}")]
    InvalidLimit { name: &'static str, value: f64 },
}
