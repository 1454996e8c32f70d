//! File providers, handles, globbing and the [`FileSystem`] facade.
//!
//! Storage is reached through [`FileProvider`]s registered per scheme. The
//! [`FileSystem`] turns logical paths (relative to the root, the output
//! directory, or the ordered list of input paths) into [`ProviderFile`] and
//! [`Directory`] handles, and evaluates glob patterns over them.

mod directory;
mod file;
mod file_system;
pub mod glob;
mod local;
mod memory;
mod provider;
mod virtual_directory;

pub use directory::{Directory, ProviderDirectory};
pub use file::ProviderFile;
pub use file_system::{FileSystem, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
pub use glob::GlobPattern;
pub use local::LocalFileProvider;
pub use memory::InMemoryFileProvider;
pub use provider::{FileProvider, ReadStream, WriteStream};
pub use virtual_directory::VirtualInputDirectory;
