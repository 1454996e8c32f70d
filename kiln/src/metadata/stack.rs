//! The layered metadata stack.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::metadata::convert::FromValue;
use crate::metadata::value::{MetadataValue, Value};
use crate::path::{DirectoryPath, FilePath};

/// One immutable set of entries, keyed case-insensitively.
#[derive(Debug, Default)]
struct Layer {
    /// Lowercased key → (key as written, value).
    entries: IndexMap<String, (String, MetadataValue)>,
}

impl Layer {
    fn from_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        let mut entries = IndexMap::new();
        for (key, value) in items {
            let key = key.into();
            entries.insert(key.to_lowercase(), (key, value.into()));
        }
        Self { entries }
    }
}

/// An immutable stack of metadata layers.
///
/// The bottom layer holds the settings; every clone that adds items pushes
/// exactly one layer on top. Lookups walk from the top down, so newer entries
/// shadow older ones. Keys compare case-insensitively.
///
/// Cloning a stack is cheap: layers are shared, never copied or mutated.
///
/// # Examples
///
/// ```
/// use kiln::metadata::MetadataStack;
///
/// let settings = MetadataStack::from_items([("Title", "Site")]);
/// let page = settings.clone_with([("title", "Page")]);
///
/// assert_eq!(page.get_string("TITLE").as_deref(), Some("Page"));
/// assert_eq!(settings.get_string("title").as_deref(), Some("Site"));
/// assert!(page.without_settings().contains_key("title"));
/// ```
#[derive(Clone, Default)]
pub struct MetadataStack {
    layers: Vec<Arc<Layer>>,
}

impl MetadataStack {
    /// An empty stack with no layers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack with a single (settings) layer.
    pub fn from_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        Self::new().clone_with(items)
    }

    /// A new stack with `items` pushed as one additional top layer.
    #[must_use]
    pub fn clone_with<I, K, V>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        let mut layers = self.layers.clone();
        layers.push(Arc::new(Layer::from_items(items)));
        Self { layers }
    }

    /// The stack without its bottom (settings) layer.
    #[must_use]
    pub fn without_settings(&self) -> Self {
        Self {
            layers: self.layers.iter().skip(1).cloned().collect(),
        }
    }

    /// Number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// The stored (unresolved) value for `key`.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<&MetadataValue> {
        let folded = key.to_lowercase();
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.entries.get(&folded).map(|(_, value)| value))
    }

    /// Whether any layer defines `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get_raw(key).is_some()
    }

    /// The value for `key`, with lazy values evaluated against this stack.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.get_raw(key).map(|value| value.resolve(self))
    }

    /// The value for `key`, or `default` when absent.
    #[must_use]
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// The value for `key` converted to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] when the key is absent and
    /// [`Error::Conversion`] when the value does not convert.
    pub fn get_as<T: FromValue>(&self, key: &str) -> Result<T> {
        let value = self.get(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })?;
        T::from_value(&value).ok_or_else(|| Error::Conversion {
            key: key.to_string(),
            target: T::TARGET,
        })
    }

    /// The value for `key` converted to `T`, if present and convertible.
    #[must_use]
    pub fn try_get<T: FromValue>(&self, key: &str) -> Option<T> {
        self.get(key).as_ref().and_then(T::from_value)
    }

    /// The value for `key` converted to `T`, or `default`.
    #[must_use]
    pub fn get_as_or<T: FromValue>(&self, key: &str, default: T) -> T {
        self.try_get(key).unwrap_or(default)
    }

    /// The value as a string.
    #[must_use]
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.try_get(key)
    }

    /// The value as a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.try_get(key)
    }

    /// The value as an integer.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.try_get(key)
    }

    /// The value as a float.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.try_get(key)
    }

    /// The value as a UTC timestamp.
    #[must_use]
    pub fn get_datetime(&self, key: &str) -> Option<DateTime<Utc>> {
        self.try_get(key)
    }

    /// The value as a file path.
    #[must_use]
    pub fn get_file_path(&self, key: &str) -> Option<FilePath> {
        self.try_get(key)
    }

    /// The value as a directory path.
    #[must_use]
    pub fn get_directory_path(&self, key: &str) -> Option<DirectoryPath> {
        self.try_get(key)
    }

    /// The value as a list of `T`.
    #[must_use]
    pub fn get_list<T: FromValue>(&self, key: &str) -> Option<Vec<T>> {
        self.try_get(key)
    }

    fn effective(&self) -> IndexMap<&str, (&str, &MetadataValue)> {
        let mut view = IndexMap::new();
        for layer in self.layers.iter().rev() {
            for (folded, (key, value)) in &layer.entries {
                view.entry(folded.as_str())
                    .or_insert((key.as_str(), value));
            }
        }
        view
    }

    /// Keys of the effective view, as written in their topmost layer.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.effective().into_values().map(|(key, _)| key).collect()
    }

    /// Resolved values of the effective view.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.iter().into_iter().map(|(_, value)| value).collect()
    }

    /// Key/value pairs of the effective view, top layer first.
    #[must_use]
    pub fn iter(&self) -> Vec<(&str, Value)> {
        self.effective()
            .into_values()
            .map(|(key, value)| (key, value.resolve(self)))
            .collect()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effective().len()
    }

    /// Whether no layer defines any key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.entries.is_empty())
    }
}

impl fmt::Debug for MetadataStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.effective().into_values() {
            match value {
                MetadataValue::Value(value) => map.entry(&key, value),
                MetadataValue::Lazy(lazy) => map.entry(&key, lazy),
            };
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Lazy;

    fn settings() -> MetadataStack {
        MetadataStack::from_items([("Title", Value::from("Site")), ("Author", Value::from("kim"))])
    }

    #[test]
    fn test_shadowing_does_not_mutate_original() {
        let base = MetadataStack::from_items([("K", "v1")]);
        let child = base.clone_with([("K", "v2")]);
        assert_eq!(child.get("K"), Some(Value::from("v2")));
        assert_eq!(base.get("K"), Some(Value::from("v1")));
    }

    #[test]
    fn test_case_insensitive_keys() {
        let stack = settings();
        assert!(stack.contains_key("title"));
        assert!(stack.contains_key("TITLE"));
        assert!(!stack.contains_key("subtitle"));
    }

    #[test]
    fn test_effective_enumeration() {
        let stack = settings().clone_with([("title", "Page"), ("Draft", "true")]);
        assert_eq!(stack.keys(), vec!["title", "Draft", "Author"]);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.values()[0], Value::from("Page"));
        assert_eq!(stack.layer_count(), 2);
    }

    #[test]
    fn test_without_settings() {
        let stack = settings().clone_with([("Draft", true)]);
        let own = stack.without_settings();
        assert!(own.contains_key("draft"));
        assert!(!own.contains_key("title"));
        assert!(MetadataStack::new().without_settings().is_empty());
    }

    #[test]
    fn test_typed_accessors_fail_softly() {
        let stack = MetadataStack::from_items([
            ("count", Value::from("12")),
            ("when", Value::from("2024-01-02")),
            ("tags", Value::from(vec!["a", "b"])),
        ]);
        assert_eq!(stack.get_i64("count"), Some(12));
        assert_eq!(stack.get_bool("count"), None);
        assert_eq!(stack.get_as_or("count", false), false);
        assert_eq!(stack.get_as_or("missing", 5_i64), 5);
        assert!(stack.get_datetime("when").is_some());
        assert_eq!(stack.get_list::<String>("tags").unwrap().len(), 2);
    }

    #[test]
    fn test_strict_get_as() {
        let stack = settings();
        assert_eq!(stack.get_as::<String>("title").unwrap(), "Site");
        assert!(matches!(
            stack.get_as::<String>("missing").unwrap_err(),
            Error::KeyNotFound { .. }
        ));
        assert!(matches!(
            stack.get_as::<i64>("title").unwrap_err(),
            Error::Conversion { target: "integer", .. }
        ));
    }

    #[test]
    fn test_lazy_value_sees_requesting_stack() {
        let base = MetadataStack::from_items([(
            "Greeting",
            MetadataValue::from(Lazy::new(|md| {
                Value::from(format!("hello {}", md.get_string("name").unwrap_or_default()))
            })),
        )]);
        let child = base.clone_with([("Name", "ana")]);
        assert_eq!(child.get_string("greeting").as_deref(), Some("hello ana"));
        assert_eq!(base.get_string("greeting").as_deref(), Some("hello "));
    }

    #[test]
    fn test_get_or() {
        let stack = settings();
        assert_eq!(stack.get_or("missing", Value::Integer(1)), Value::Integer(1));
    }
}
