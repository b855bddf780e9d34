//! Daily weight record
//!
//! One row per calendar date. `date` is unique across all records; that is
//! the only invariant storage enforces.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// ISO 8601 calendar date, the storage and form representation
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Record as stored
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct DailyRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub weight: f64,
    pub memo: String,
}

/// Validated field values for insert and update
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub date: NaiveDate,
    pub weight: f64,
    pub memo: String,
}

impl NewRecord {
    /// Build a record from raw form values.
    ///
    /// `date` and `weight` are required; a missing memo becomes `""`.
    ///
    /// # Example
    /// ```
    /// use weightlog_server::models::NewRecord;
    ///
    /// let rec = NewRecord::parse(Some("2024-01-01"), Some("70.5"), None).unwrap();
    /// assert_eq!(rec.memo, "");
    /// assert!(NewRecord::parse(Some("2024-01-01"), None, None).is_err());
    /// ```
    pub fn parse(
        date: Option<&str>,
        weight: Option<&str>,
        memo: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            date: parse_date(date)?,
            weight: parse_weight(weight)?,
            memo: memo.unwrap_or_default().to_owned(),
        })
    }
}

/// Parse a required `YYYY-MM-DD` date field.
///
/// Years are limited to four unsigned digits so the stored text sorts in
/// date order.
pub fn parse_date(raw: Option<&str>) -> Result<NaiveDate, ValidationError> {
    let raw = required("date", raw)?;
    let invalid = ValidationError::InvalidFormat {
        field: "date",
        reason: "expected a date in YYYY-MM-DD form",
    };
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) if (0..=9999).contains(&date.year()) => Ok(date),
        _ => Err(invalid),
    }
}

/// Parse a required weight field. Any finite number is accepted.
pub fn parse_weight(raw: Option<&str>) -> Result<f64, ValidationError> {
    let raw = required("weight", raw)?;
    match raw.parse::<f64>() {
        Ok(w) if w.is_finite() => Ok(w),
        _ => Err(ValidationError::InvalidFormat {
            field: "weight",
            reason: "expected a number",
        }),
    }
}

fn required<'a>(field: &'static str, raw: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ValidationError::Missing { field }),
    }
}
