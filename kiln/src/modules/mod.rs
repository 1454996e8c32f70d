//! Consumer modules built on the file system and document model.
//!
//! - [`read_files`]: input files into documents carrying source metadata
//! - [`write_files`]: documents out to the output directory
//! - [`copy_files`]: input files straight to the output directory
//!
//! # Examples
//!
//! ```no_run
//! use kiln::config::ConfigBuilder;
//! use kiln::{modules, Engine};
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let engine = Engine::from_config(&config, Path::new("/srv/site")).unwrap();
//!
//! engine.prepare_output().unwrap();
//! let docs = modules::read_files(&engine, &["**/*.html"]).unwrap();
//! let result = modules::write_files(&engine, &docs).unwrap();
//! println!("Wrote {} documents", result.written.len());
//! ```

pub mod copy;
pub mod read;
pub mod write;

pub use copy::{copy_files, CopiedFile, CopyResult};
pub use read::{read_file, read_files};
pub use write::{destination, write_files, WriteResult};
