#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # kiln
//!
//! The core of a static-content generator: a virtual file system spanning
//! several input roots and storage providers, and an immutable document model
//! with layered metadata over a shared content stream.
//!
//! ## Core Types
//!
//! - [`FilePath`] and [`DirectoryPath`]: normalized, provider-qualified paths
//! - [`FileSystem`] and [`FileProvider`]: path resolution over pluggable storage
//! - [`MetadataStack`]: cascading, case-insensitive key/value layers
//! - [`Document`] and [`DocumentFactory`]: content plus metadata, cloned immutably
//! - [`Engine`]: a configured file system and document factory
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use kiln::document::DocumentUpdate;
//! use kiln::{DirectoryPath, DocumentFactory, FilePath, FileSystem, InMemoryFileProvider};
//! use std::sync::Arc;
//!
//! let memory = InMemoryFileProvider::new()
//!     .with_file("/site/input/about.md", "# About")
//!     .unwrap();
//! let mut fs = FileSystem::new(DirectoryPath::new("/site").unwrap()).unwrap();
//! fs.register_provider("", Arc::new(memory));
//!
//! let file = fs.get_input_file(&FilePath::new("about.md").unwrap()).unwrap();
//! assert!(file.exists());
//!
//! let factory = DocumentFactory::default();
//! let doc = factory
//!     .get_document_from(
//!         None,
//!         DocumentUpdate::new()
//!             .with_source(file.path().clone())
//!             .with_content(file.read_bytes().unwrap())
//!             .with_items([("Title", "About")]),
//!     )
//!     .unwrap();
//! assert_eq!(doc.metadata().get_string("title").as_deref(), Some("About"));
//! assert_eq!(doc.content_string().unwrap(), "# About");
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod metadata;
pub mod modules;
pub mod path;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use document::{Document, DocumentFactory, DocumentUpdate};
pub use engine::Engine;
pub use error::{Error, Result};
pub use io::{
    Directory, FileProvider, FileSystem, InMemoryFileProvider, LocalFileProvider, ProviderFile,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use metadata::{MetadataStack, Value};
pub use path::{DirectoryPath, FilePath, NormalizedPath, PathRelationship};
