//! The storage backend seam.

use std::fmt;
use std::io::{Read, Write};

use crate::error::Result;
use crate::path::{DirectoryPath, FilePath};

/// A readable stream handed out by a provider.
pub type ReadStream = Box<dyn Read + Send>;

/// A writable stream handed out by a provider.
pub type WriteStream = Box<dyn Write + Send>;

/// A pluggable storage backend over one address space.
///
/// Providers are registered on a [`FileSystem`](crate::io::FileSystem) under a
/// scheme string and receive every path whose scheme matches. Paths are
/// always absolute by the time they reach a provider. A provider must not
/// interpret the scheme: the same provider instance may be registered under
/// several schemes, and enumeration results carry the scheme of the
/// directory that was enumerated.
///
/// Implementations must be safe for concurrent reads; the file system performs
/// no locking of its own.
#[cfg_attr(test, mockall::automock)]
pub trait FileProvider: Send + Sync + fmt::Debug {
    /// Whether a file exists at `path`.
    fn file_exists(&self, path: &FilePath) -> bool;

    /// Whether a directory exists at `path`.
    fn directory_exists(&self, path: &DirectoryPath) -> bool;

    /// Files in `directory` whose file name matches `search_pattern` (a
    /// single-segment wildcard such as `*` or `*.md`), descending into
    /// subdirectories when `recursive` is set.
    ///
    /// A missing directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails while listing, or the search
    /// pattern is malformed.
    fn files(
        &self,
        directory: &DirectoryPath,
        search_pattern: &str,
        recursive: bool,
    ) -> Result<Vec<FilePath>>;

    /// Subdirectories of `directory`, descending when `recursive` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails while listing.
    fn directories(&self, directory: &DirectoryPath, recursive: bool)
        -> Result<Vec<DirectoryPath>>;

    /// Open a file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileNotFound`](crate::Error::FileNotFound) for a
    /// missing file, or an I/O error.
    fn open_read(&self, path: &FilePath) -> Result<ReadStream>;

    /// Open a file for writing, truncating it and creating missing parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created.
    fn open_write(&self, path: &FilePath) -> Result<WriteStream>;

    /// Create a directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    fn create_directory(&self, path: &DirectoryPath) -> Result<()>;

    /// Delete a file. Deleting a missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be removed.
    fn delete_file(&self, path: &FilePath) -> Result<()>;

    /// Delete a directory, with its contents when `recursive` is set.
    /// Deleting a missing directory is not an error.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory exists but cannot be removed.
    fn delete_directory(&self, path: &DirectoryPath, recursive: bool) -> Result<()>;

    /// Length of a file in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileNotFound`](crate::Error::FileNotFound) for a
    /// missing file.
    fn file_length(&self, path: &FilePath) -> Result<u64>;
}

/// Compile a single-segment search pattern into a file-name matcher.
pub(crate) fn name_matcher(search_pattern: &str) -> Result<globset::GlobMatcher> {
    let pattern = if search_pattern.is_empty() {
        "*"
    } else {
        search_pattern
    };
    globset::GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| crate::Error::InvalidGlobPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}
