//! Conversions from metadata values to concrete types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::metadata::Value;
use crate::path::{DirectoryPath, FilePath};

/// A type a metadata [`Value`] can be converted into.
///
/// Conversions are lenient where the intent is unambiguous: numbers and
/// paths render to strings, numeric and boolean strings parse, and a single
/// value converts to a one-element list.
pub trait FromValue: Sized {
    /// A short name of the target type, used in conversion errors.
    const TARGET: &'static str;

    /// Convert, or return `None` when the value does not fit.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const TARGET: &'static str = "value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    const TARGET: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::List(_) | Value::Map(_) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl FromValue for bool {
    const TARGET: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const TARGET: &'static str = "integer";

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(*i),
            Value::Float(x) if x.fract() == 0.0 && x.is_finite() => Some(*x as i64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const TARGET: &'static str = "float";

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Integer(i) => Some(*i as f64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromValue for DateTime<Utc> {
    const TARGET: &'static str = "datetime";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::DateTime(d) => Some(*d),
            Value::String(s) => parse_datetime(s.trim()),
            _ => None,
        }
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl FromValue for FilePath {
    const TARGET: &'static str = "file path";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::FilePath(p) => Some(p.clone()),
            Value::String(s) => FilePath::new(s).ok(),
            _ => None,
        }
    }
}

impl FromValue for DirectoryPath {
    const TARGET: &'static str = "directory path";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::DirectoryPath(p) => Some(p.clone()),
            Value::String(s) => DirectoryPath::new(s).ok(),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const TARGET: &'static str = "list";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            Value::Null | Value::Map(_) => None,
            single => T::from_value(single).map(|item| vec![item]),
        }
    }
}
