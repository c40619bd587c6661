//! Shippable items and their ingestion.
//!
//! [`Item`] is the only input the consolidation engine accepts: a route,
//! a ready date, a supplier and non-negative volume/weight. Items are
//! immutable once built.
//!
//! Upstream readers (CSV, database rows, JSON) hand over [`RawRecord`]s
//! of untyped text. [`ingest`] turns them into items and reports the
//! records that fail validation instead of aborting the run.

mod record;
mod types;

pub use record::{ingest, IngestReport, RawRecord, RecordError, RejectedRecord, READY_DATE_FORMAT};
pub use types::{Item, RouteKey, ValidationError};
