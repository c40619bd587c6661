//! Raw records and the ingestion step that validates them.

use super::types::{checked_quantity, Item, RouteKey, ValidationError};
use chrono::NaiveDate;
use std::fmt;
use tracing::warn;

/// Textual ready-date format accepted by [`RawRecord::parse`] (month/day/year).
pub const READY_DATE_FORMAT: &str = "%m/%d/%Y";

/// Cell values that count as "no value" after trimming.
const NULL_TOKENS: [&str; 5] = ["", "nan", "Nan", "NaN", "null"];

/// An untyped input row, as read from a CSV file, a database or a JSON feed.
///
/// Every field is optional text. Use [`RawRecord::parse`] or [`ingest`] to
/// turn records into [`Item`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawRecord {
    pub pickup_location: Option<String>,
    pub deliver_to_location: Option<String>,
    pub supplier: Option<String>,
    pub total_volume: Option<String>,
    pub total_weight: Option<String>,
    pub ready_date: Option<String>,
}

/// All validation failures found in one record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RecordError {
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("item validation errors: ")?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RecordError {}

impl RawRecord {
    /// Validates the record and builds an [`Item`].
    ///
    /// Pickup, delivery and ready date are required. Missing volume or
    /// weight default to zero, a missing supplier to the empty string.
    /// Every failing field is reported, not only the first one.
    pub fn parse(&self) -> Result<Item, RecordError> {
        let mut errors = Vec::new();

        let pickup = present(&self.pickup_location);
        if pickup.is_none() {
            errors.push(ValidationError::MissingPickupLocation);
        }
        let deliver = present(&self.deliver_to_location);
        if deliver.is_none() {
            errors.push(ValidationError::MissingDeliverToLocation);
        }

        let ready_date = match present(&self.ready_date) {
            None => {
                errors.push(ValidationError::MissingReadyDate);
                None
            }
            Some(text) => match parse_ready_date(text.trim()) {
                Some(date) => Some(date),
                None => {
                    errors.push(ValidationError::InvalidReadyDate {
                        value: text.to_string(),
                    });
                    None
                }
            },
        };

        let volume = quantity("total_volume", &self.total_volume).unwrap_or_else(|e| {
            errors.push(e);
            0.0
        });
        let weight = quantity("total_weight", &self.total_weight).unwrap_or_else(|e| {
            errors.push(e);
            0.0
        });

        match (pickup, deliver, ready_date) {
            (Some(pickup), Some(deliver), Some(ready_date)) if errors.is_empty() => {
                let route = RouteKey::new(pickup, deliver).map_err(|e| RecordError {
                    errors: vec![e],
                })?;
                Item::new(route, ready_date)
                    .with_supplier(present(&self.supplier).unwrap_or_default())
                    .with_volume(volume)
                    .and_then(|item| item.with_weight(weight))
                    .map_err(|e| RecordError { errors: vec![e] })
            }
            _ => Err(RecordError { errors }),
        }
    }
}

/// A record skipped during ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RejectedRecord {
    /// Position of the record in the input sequence.
    pub index: usize,
    pub error: RecordError,
}

/// Outcome of [`ingest`]: the valid items in input order plus the
/// records that were skipped.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub items: Vec<Item>,
    pub rejected: Vec<RejectedRecord>,
}

/// Validates a sequence of raw records.
///
/// Invalid records are logged and reported, never raised: one bad row
/// does not fail the run.
pub fn ingest<I>(records: I) -> IngestReport
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut report = IngestReport::default();
    for (index, record) in records.into_iter().enumerate() {
        match record.parse() {
            Ok(item) => report.items.push(item),
            Err(error) => {
                warn!(index, %error, "skipping invalid record");
                report.rejected.push(RejectedRecord { index, error });
            }
        }
    }
    report
}

/// Non-null field text, untrimmed. Locations are compared verbatim.
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !NULL_TOKENS.contains(&v.trim()))
}

/// `%Y` alone would accept `1/5/21` as year 21, so the year must be four digits.
fn parse_ready_date(text: &str) -> Option<NaiveDate> {
    let four_digit_year = text
        .rsplit('/')
        .next()
        .is_some_and(|year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()));
    if !four_digit_year {
        return None;
    }
    NaiveDate::parse_from_str(text, READY_DATE_FORMAT).ok()
}

fn quantity(field: &'static str, value: &Option<String>) -> Result<f64, ValidationError> {
    match present(value) {
        None => Ok(0.0),
        Some(text) => {
            let parsed = text
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::InvalidQuantity {
                    field,
                    value: text.to_string(),
                })?;
            checked_quantity(field, parsed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::RouteGrouper;

    fn record(pickup: &str, deliver: &str, date: &str) -> RawRecord {
        RawRecord {
            pickup_location: Some(pickup.into()),
            deliver_to_location: Some(deliver.into()),
            supplier: Some("Supplier 1".into()),
            total_volume: Some("15.0".into()),
            total_weight: Some("200".into()),
            ready_date: Some(date.into()),
        }
    }

    #[test]
    fn test_parse_valid_record() {
        let item = record("PickupA", "DeliverA", "01/05/2021").parse().unwrap();
        assert_eq!(item.pickup_location(), "PickupA");
        assert_eq!(item.deliver_to_location(), "DeliverA");
        assert_eq!(item.supplier(), "Supplier 1");
        assert!((item.total_volume() - 15.0).abs() < 1e-10);
        assert!((item.total_weight() - 200.0).abs() < 1e-10);
        assert_eq!(
            item.ready_date(),
            NaiveDate::from_ymd_opt(2021, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_parse_unpadded_date() {
        let item = record("A", "B", "1/5/2021").parse().unwrap();
        assert_eq!(
            item.ready_date(),
            NaiveDate::from_ymd_opt(2021, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_missing_quantities_default_to_zero() {
        let mut raw = record("A", "B", "01/05/2021");
        raw.total_volume = None;
        raw.total_weight = Some("NaN".into());
        raw.supplier = Some("nan".into());

        let item = raw.parse().unwrap();
        assert_eq!(item.total_volume(), 0.0);
        assert_eq!(item.total_weight(), 0.0);
        assert_eq!(item.supplier(), "");
    }

    #[test]
    fn test_null_tokens_count_as_missing() {
        for token in ["", "nan", "Nan", "NaN", "null", "   "] {
            let err = record(token, "B", "01/05/2021").parse().unwrap_err();
            assert_eq!(err.errors, vec![ValidationError::MissingPickupLocation]);
        }
    }

    #[test]
    fn test_reports_every_failure() {
        let raw = RawRecord {
            total_volume: Some("-3".into()),
            ..RawRecord::default()
        };
        let err = raw.parse().unwrap_err();
        assert_eq!(
            err.errors,
            vec![
                ValidationError::MissingPickupLocation,
                ValidationError::MissingDeliverToLocation,
                ValidationError::MissingReadyDate,
                ValidationError::InvalidQuantity {
                    field: "total_volume",
                    value: "-3".into(),
                },
            ]
        );
        assert!(err.to_string().starts_with("item validation errors: "));
    }

    #[test]
    fn test_rejects_iso_dates() {
        let err = record("A", "B", "2021-01-05").parse().unwrap_err();
        assert_eq!(
            err.errors,
            vec![ValidationError::InvalidReadyDate {
                value: "2021-01-05".into()
            }]
        );
    }

    #[test]
    fn test_rejects_two_digit_year() {
        for date in ["1/5/21", "01/05/0021", "01/05/20211"] {
            let err = record("A", "B", date).parse().unwrap_err();
            assert_eq!(
                err.errors,
                vec![ValidationError::InvalidReadyDate { value: date.into() }]
            );
        }
        assert!(record("A", "B", " 01/05/2021 ").parse().is_ok());
    }

    #[test]
    fn test_location_whitespace_is_significant() {
        let padded = record(" PickupA", "DeliverA", "01/05/2021").parse().unwrap();
        let plain = record("PickupA", "DeliverA", "01/05/2021").parse().unwrap();
        assert_eq!(padded.pickup_location(), " PickupA");
        assert_ne!(padded.route(), plain.route());

        let report = ingest(vec![
            record(" PickupA", "DeliverA", "01/05/2021"),
            record("PickupA", "DeliverA", "01/06/2021"),
        ]);
        let buckets = RouteGrouper::group(report.items);
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn test_rejects_unparseable_weight() {
        let mut raw = record("A", "B", "01/05/2021");
        raw.total_weight = Some("heavy".into());
        let err = raw.parse().unwrap_err();
        assert!(matches!(
            err.errors.as_slice(),
            [ValidationError::InvalidQuantity {
                field: "total_weight",
                ..
            }]
        ));
    }

    #[test]
    fn test_ingest_skips_invalid_records() {
        let records = vec![
            record("A", "B", "01/05/2021"),
            record("", "B", "01/05/2021"),
            record("A", "B", ""),
            record("C", "D", "02/01/2021"),
        ];
        let report = ingest(records);

        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[1].pickup_location(), "C");
        let indices: Vec<usize> = report.rejected.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }
}
