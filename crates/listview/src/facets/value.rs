//! Facet value normalisation.
//!
//! Raw entity fields come in many shapes: plain strings, `{ name }` objects,
//! arrays of either, arrays of objects with their own arrays, dates as
//! strings or epoch milliseconds. [`FacetValue::extract`] reduces each of them
//! to one of four shapes the filter can compare.

use chrono::{DateTime, Datelike, FixedOffset, Month, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;

use super::spec::{FacetKind, FacetSpec};
use crate::model::Entity;

/// Sentinel meaning "the entity has no value for this facet".
pub const NOT_SPECIFIED: &str = "Not Specified";
/// Alternate spelling of [`NOT_SPECIFIED`] used by some pages.
pub const NONE: &str = "None";

pub fn is_sentinel(value: &str) -> bool {
    value == NOT_SPECIFIED || value == NONE
}

/// Normalised value of one facet on one entity.
#[derive(Debug, Clone, PartialEq)]
pub enum FacetValue {
    /// Missing, `null`, or an empty array.
    Unspecified,
    Text(String),
    List(Vec<String>),
    Date(DateTime<FixedOffset>),
}

impl FacetValue {
    pub fn extract(entity: &Entity, spec: &FacetSpec, offset: FixedOffset) -> Self {
        let Some(raw) = entity.get(spec.field_path()) else {
            return FacetValue::Unspecified;
        };

        match spec.kind {
            FacetKind::Scalar => match raw {
                Value::Array(items) => {
                    list_or_unspecified(items.iter().filter_map(normalize_scalar).collect())
                }
                other => normalize_scalar(other)
                    .map(FacetValue::Text)
                    .unwrap_or(FacetValue::Unspecified),
            },
            FacetKind::Nested => {
                let elements: Vec<&Value> = match raw {
                    Value::Array(items) => items.iter().collect(),
                    object @ Value::Object(_) => vec![object],
                    _ => Vec::new(),
                };
                list_or_unspecified(
                    elements
                        .into_iter()
                        .flat_map(|element| nested_values(element, spec.field.as_deref()))
                        .collect(),
                )
            }
            FacetKind::Date | FacetKind::Month => parse_date(raw, offset)
                .map(FacetValue::Date)
                .unwrap_or(FacetValue::Unspecified),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, FacetValue::Unspecified)
    }

    /// The string values to compare against accepted values.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            FacetValue::Text(s) => vec![s.as_str()],
            FacetValue::List(items) => items.iter().map(String::as_str).collect(),
            FacetValue::Unspecified | FacetValue::Date(_) => Vec::new(),
        }
    }

    pub fn as_date(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            FacetValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

fn list_or_unspecified(values: Vec<String>) -> FacetValue {
    if values.is_empty() {
        FacetValue::Unspecified
    } else {
        FacetValue::List(values)
    }
}

/// Reduces a scalar-ish JSON value to a comparable string.
///
/// Objects reduce to their `name` property.
pub fn normalize_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => map.get("name").and_then(normalize_scalar),
        Value::Null | Value::Array(_) => None,
    }
}

fn nested_values(element: &Value, field: Option<&str>) -> Vec<String> {
    let target = match field {
        Some(field) => element.get(field),
        None => Some(element),
    };
    match target {
        Some(Value::Array(items)) => items.iter().filter_map(normalize_scalar).collect(),
        Some(other) => normalize_scalar(other).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Parses a JSON date into the given offset.
///
/// Accepts RFC 3339 strings, date-only strings (UTC midnight), naive
/// date-times (interpreted in `offset`), and epoch milliseconds.
pub fn parse_date(value: &Value, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    match value {
        Value::String(s) => parse_date_str(s, offset),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.with_timezone(&offset)),
        _ => None,
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

pub fn parse_date_str(s: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&offset));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc().with_timezone(&offset));
    }
    NAIVE_DATETIME_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(s, format)
            .ok()
            .and_then(|naive| offset.from_local_datetime(&naive).single())
    })
}

pub fn same_day(a: &DateTime<FixedOffset>, b: &DateTime<FixedOffset>) -> bool {
    a.date_naive() == b.date_naive()
}

pub fn month_name(date: &DateTime<FixedOffset>) -> &'static str {
    u8::try_from(date.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or_default()
}
