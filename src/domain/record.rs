//! Field-level access shared by every entity shown in a list view.
//!
//! The list-view engine never knows which entity it is filtering. It asks a
//! [`Record`] for a field by name and receives a [`FieldValue`], or `None`
//! when the record has no such field or the value is null.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primitive value of a single record field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl FieldValue<'_> {
    /// Text form used for substring search and exact tag matching.
    ///
    /// Dates render as ISO 8601 so a search for `2024-03` finds March records.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Integer(n) => Cow::Owned(n.to_string()),
            FieldValue::Float(n) => Cow::Owned(n.to_string()),
            FieldValue::Bool(b) => Cow::Owned(b.to_string()),
            FieldValue::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            FieldValue::DateTime(dt) => Cow::Owned(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDateTime> for FieldValue<'_> {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<NaiveDate> for FieldValue<'_> {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

/// Anything the list-view engine can search, filter and paginate.
pub trait Record {
    /// Looks up a field by its API name (e.g. `submitDate`).
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

/// Untyped record backed by a JSON object.
///
/// Used for payloads that have no canonical entity type yet. Nested arrays
/// and objects are not primitives and read as missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynamicRecord(pub BTreeMap<String, Value>);

impl DynamicRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy in tests and fixtures.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }
}

impl Record for DynamicRecord {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self.0.get(name)? {
            Value::String(s) => Some(FieldValue::Text(s)),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(FieldValue::Integer(i)),
                None => n.as_f64().map(FieldValue::Float),
            },
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
