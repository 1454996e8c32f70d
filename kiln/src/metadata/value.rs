//! Metadata values.

use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

use crate::metadata::MetadataStack;
use crate::path::{DirectoryPath, FilePath};

/// A plain metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// Text.
    String(String),
    /// A point in time.
    DateTime(DateTime<Utc>),
    /// A file location.
    FilePath(FilePath),
    /// A directory location.
    DirectoryPath(DirectoryPath),
    /// An ordered list.
    List(Vec<Value>),
    /// A nested map, in insertion order.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// The name of the variant, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::DateTime(_) => "datetime",
            Self::FilePath(_) => "file path",
            Self::DirectoryPath(_) => "directory path",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Whether this is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Self::Null,
            serde_yaml::Value::Bool(b) => Self::Bool(b),
            serde_yaml::Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_yaml::Value::String(s) => Self::String(s),
            serde_yaml::Value::Sequence(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_yaml::Value::Mapping(map) => Self::Map(
                map.into_iter()
                    .filter_map(|(k, v)| yaml_key(k).map(|k| (k, Self::from(v))))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i32 => Integer,
    i64 => Integer,
    u32 => Integer,
    f64 => Float,
    String => String,
    &str => String,
    DateTime<Utc> => DateTime,
    FilePath => FilePath,
    DirectoryPath => DirectoryPath,
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => b.fmt(f),
            Self::Integer(i) => i.fmt(f),
            Self::Float(x) => x.fmt(f),
            Self::String(s) => s.fmt(f),
            Self::DateTime(d) => write!(f, "{}", d.to_rfc3339()),
            Self::FilePath(p) => p.fmt(f),
            Self::DirectoryPath(p) => p.fmt(f),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Map(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::String(s) => serializer.serialize_str(s),
            Self::DateTime(d) => serializer.serialize_str(&d.to_rfc3339()),
            Self::FilePath(p) => serializer.collect_str(p),
            Self::DirectoryPath(p) => serializer.collect_str(p),
            Self::List(items) => serializer.collect_seq(items),
            Self::Map(map) => serializer.collect_map(map),
        }
    }
}

type Compute = dyn Fn(&MetadataStack) -> Value + Send + Sync;

/// A value computed on access from the metadata of the requesting document.
///
/// A cached lazy value computes once and then returns the same result for
/// every reader of the same value instance (clones share the cache). An
/// uncached one recomputes on every read.
///
/// The computation must not read its own key, directly or indirectly.
#[derive(Clone)]
pub struct Lazy {
    compute: Arc<Compute>,
    cache: Option<Arc<OnceLock<Value>>>,
}

impl Lazy {
    /// A value recomputed on every access.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn(&MetadataStack) -> Value + Send + Sync + 'static,
    {
        Self {
            compute: Arc::new(compute),
            cache: None,
        }
    }

    /// A value computed on first access and cached afterwards.
    pub fn cached<F>(compute: F) -> Self
    where
        F: Fn(&MetadataStack) -> Value + Send + Sync + 'static,
    {
        Self {
            compute: Arc::new(compute),
            cache: Some(Arc::new(OnceLock::new())),
        }
    }

    /// Whether results are cached.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Evaluate against `metadata`.
    #[must_use]
    pub fn resolve(&self, metadata: &MetadataStack) -> Value {
        match &self.cache {
            Some(cell) => cell.get_or_init(|| (self.compute)(metadata)).clone(),
            None => (self.compute)(metadata),
        }
    }
}

impl fmt::Debug for Lazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.cache {
            None => "uncached",
            Some(cell) if cell.get().is_some() => "cached (resolved)",
            Some(_) => "cached (pending)",
        };
        f.debug_tuple("Lazy").field(&state).finish()
    }
}

/// What a metadata layer stores: a plain value or a deferred one.
#[derive(Debug, Clone)]
pub enum MetadataValue {
    /// A plain value.
    Value(Value),
    /// A value computed on access.
    Lazy(Lazy),
}

impl MetadataValue {
    /// Resolve to a plain value, evaluating lazy values against `metadata`.
    #[must_use]
    pub fn resolve(&self, metadata: &MetadataStack) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Lazy(lazy) => lazy.resolve(metadata),
        }
    }
}

impl<T: Into<Value>> From<T> for MetadataValue {
    fn from(value: T) -> Self {
        Self::Value(value.into())
    }
}

impl From<Lazy> for MetadataValue {
    fn from(lazy: Lazy) -> Self {
        Self::Lazy(lazy)
    }
}
