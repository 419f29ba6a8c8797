//! FILENAME: core/records/src/value.rs
//! PURPOSE: Defines the typed values a table record can hold.
//! CONTEXT: Every column of a dashboard table (channels, peers, ...) carries
//! one of these values. The declared `ValueType` of a column decides which
//! filter conditions, sort rules and group aggregations apply to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Date,
    Duration,
    Enum,
    Array,
}

impl ValueType {
    /// Whether values of this type are summed when rows are grouped.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Number | ValueType::Duration)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Date => "date",
            ValueType::Duration => "duration",
            ValueType::Enum => "enum",
            ValueType::Array => "array",
        };
        f.write_str(name)
    }
}

/// A single value stored under a column key of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
    /// Whole seconds.
    Duration(i64),
    /// Enum tag, e.g. `NodeConnectionStatusConnected`.
    Enum(String),
    /// Tags and other array columns.
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn enum_tag(s: impl Into<String>) -> Self {
        FieldValue::Enum(s.into())
    }

    /// Returns the value type, or None for `Empty`.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            FieldValue::Empty => None,
            FieldValue::Text(_) => Some(ValueType::String),
            FieldValue::Number(_) => Some(ValueType::Number),
            FieldValue::Boolean(_) => Some(ValueType::Boolean),
            FieldValue::Date(_) => Some(ValueType::Date),
            FieldValue::Duration(_) => Some(ValueType::Duration),
            FieldValue::Enum(_) => Some(ValueType::Enum),
            FieldValue::List(_) => Some(ValueType::Array),
        }
    }

    /// Empty values and empty strings/lists count as blank.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) | FieldValue::Enum(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Numeric magnitude for numbers and durations.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Duration(secs) => Some(*secs as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the display value as a String.
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Text(s) | FieldValue::Enum(s) => s.clone(),
            FieldValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
            FieldValue::Date(d) => d.format("%Y-%m-%d %H:%M:%S").to_string(),
            FieldValue::Duration(secs) => format_duration(*secs),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Empty
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Date(value)
    }
}

/// Formats without unnecessary decimal places.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

/// Formats seconds as `1d 2h 3m 4s`, skipping leading zero units.
pub fn format_duration(total_seconds: i64) -> String {
    if total_seconds == 0 {
        return "0s".to_string();
    }

    let sign = if total_seconds < 0 { "-" } else { "" };
    let mut rest = total_seconds.unsigned_abs();
    let days = rest / 86_400;
    rest %= 86_400;
    let hours = rest / 3_600;
    rest %= 3_600;
    let minutes = rest / 60;
    let seconds = rest % 60;

    let mut parts = Vec::new();
    for (amount, unit) in [(days, "d"), (hours, "h"), (minutes, "m"), (seconds, "s")] {
        if amount > 0 || !parts.is_empty() {
            parts.push(format!("{}{}", amount, unit));
        }
    }
    format!("{}{}", sign, parts.join(" "))
}
