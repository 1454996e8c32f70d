//! Documents and the factory that creates them.
//!
//! A [`Document`] couples a [`MetadataStack`](crate::metadata::MetadataStack)
//! with a content stream shared along its clone lineage. Access to the
//! stream is serialized: [`Document::stream`] blocks until no other document
//! sharing the stream holds a [`ContentGuard`].

mod content;
mod entity;
mod factory;

pub use content::{Content, ContentGuard, ContentStream};
pub use entity::Document;
pub use factory::{DocumentFactory, DocumentUpdate};
