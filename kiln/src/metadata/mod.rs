//! Layered, immutable document metadata.
//!
//! A [`MetadataStack`] is an ordered list of layers. Settings sit at the
//! bottom; every document clone that adds items pushes one more layer.
//! Values are plain [`Value`]s or [`Lazy`] computations evaluated against
//! the stack that requests them.

mod convert;
pub mod keys;
mod stack;
mod value;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use convert::FromValue;
pub use stack::MetadataStack;
pub use value::{Lazy, MetadataValue, Value};

/// Build a settings stack from a YAML mapping.
///
/// Non-string keys that cannot be rendered as text are skipped.
#[must_use]
pub fn settings_from_yaml<'a, I>(settings: I) -> MetadataStack
where
    I: IntoIterator<Item = (&'a String, &'a serde_yaml::Value)>,
{
    MetadataStack::from_items(
        settings
            .into_iter()
            .map(|(key, value)| (key.clone(), Value::from(value.clone()))),
    )
}
