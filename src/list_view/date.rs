//! Calendar-date normalization for the date-range filter.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::record::FieldValue;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date: {0}")]
pub struct DateParseError(pub String);

/// Parses a date-like string into a timestamp.
///
/// Date-only inputs resolve to midnight. RFC 3339 timestamps keep the wall
/// clock of their own offset.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parses a date-like string and discards the time of day.
pub fn normalize_date(value: &str) -> Option<NaiveDate> {
    parse_timestamp(value).map(|dt| dt.date())
}

/// Calendar date of a record field, if it holds one.
pub(crate) fn field_date(value: &FieldValue<'_>) -> Option<NaiveDate> {
    match value {
        FieldValue::Date(date) => Some(*date),
        FieldValue::DateTime(dt) => Some(dt.date()),
        FieldValue::Text(s) => normalize_date(s),
        FieldValue::Integer(_) | FieldValue::Float(_) | FieldValue::Bool(_) => None,
    }
}

/// Inclusive calendar-date bounds. A missing side is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Builds a range from raw input values, as sent by date pickers.
    ///
    /// Blank values leave that side open; anything else must parse.
    pub fn from_strs(start: &str, end: &str) -> Result<Self, DateParseError> {
        let parse_bound = |raw: &str| -> Result<Option<NaiveDate>, DateParseError> {
            if raw.trim().is_empty() {
                return Ok(None);
            }
            normalize_date(raw)
                .map(Some)
                .ok_or_else(|| DateParseError(raw.trim().to_string()))
        };
        Ok(Self {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        })
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}
