//! Directory paths.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::path::{FilePath, NormalizedPath};

/// A normalized path that names a directory.
///
/// # Examples
///
/// ```
/// use kiln::path::{DirectoryPath, FilePath};
///
/// let root = DirectoryPath::new("/site").unwrap();
/// let input = root.combine(&DirectoryPath::new("input").unwrap()).unwrap();
/// assert_eq!(input.to_string(), "/site/input");
///
/// let file = input.combine_file(&FilePath::new("../theme/a.css").unwrap()).unwrap();
/// assert_eq!(file.to_string(), "/site/theme/a.css");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectoryPath(NormalizedPath);

impl DirectoryPath {
    /// Parse a directory path.
    ///
    /// # Errors
    ///
    /// Fails if the string is empty or climbs above an absolute root.
    pub fn new(raw: &str) -> Result<Self> {
        Ok(Self(NormalizedPath::parse(raw)?))
    }

    /// Parse a path that must be absolute.
    ///
    /// # Errors
    ///
    /// Fails for relative paths in addition to the [`DirectoryPath::new`] cases.
    pub fn absolute(raw: &str) -> Result<Self> {
        let path = Self::new(raw)?;
        path.require_absolute()?;
        Ok(path)
    }

    /// Wrap a normalized path.
    #[must_use]
    pub fn from_normalized(path: NormalizedPath) -> Self {
        Self(path)
    }

    /// The absolute root directory (`/`) of the default provider.
    #[must_use]
    pub fn root() -> Self {
        Self(NormalizedPath::empty(true))
    }

    /// The relative current directory (`.`).
    #[must_use]
    pub fn current() -> Self {
        Self(NormalizedPath::empty(false))
    }

    /// Return an error unless this path is absolute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for relative paths.
    pub fn require_absolute(&self) -> Result<()> {
        if self.is_absolute() {
            Ok(())
        } else {
            Err(Error::invalid_path(self, "path must be absolute"))
        }
    }

    /// The underlying normalized path.
    #[must_use]
    pub fn as_normalized(&self) -> &NormalizedPath {
        &self.0
    }

    /// Whether this is the relative current directory (`.`).
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.is_relative() && self.segments().is_empty()
    }

    /// The parent directory, or `None` at a root or at `.`.
    #[must_use]
    pub fn parent(&self) -> Option<DirectoryPath> {
        self.0.parent_parts().map(Self)
    }

    /// Append a relative directory path (absolute arguments replace this path).
    ///
    /// # Errors
    ///
    /// Fails if the combination climbs above an absolute root.
    pub fn combine(&self, other: &DirectoryPath) -> Result<DirectoryPath> {
        self.0.combine(&other.0).map(Self)
    }

    /// Append a relative file path (absolute arguments are returned as-is).
    ///
    /// # Errors
    ///
    /// Fails if the combination climbs above an absolute root.
    pub fn combine_file(&self, file: &FilePath) -> Result<FilePath> {
        FilePath::from_normalized(self.0.combine(file.as_normalized())?)
    }

    /// The path of `file` relative to this directory.
    ///
    /// # Errors
    ///
    /// See [`NormalizedPath::relative_path`].
    pub fn relative_file(&self, file: &FilePath) -> Result<FilePath> {
        FilePath::from_normalized(self.0.relative_path(file.as_normalized())?)
    }

    /// The path of `directory` relative to this directory.
    ///
    /// # Errors
    ///
    /// See [`NormalizedPath::relative_path`].
    pub fn relative_directory(&self, directory: &DirectoryPath) -> Result<DirectoryPath> {
        self.0.relative_path(&directory.0).map(Self)
    }

    /// The same directory under another provider scheme.
    #[must_use]
    pub fn with_scheme(&self, scheme: &str) -> DirectoryPath {
        Self(self.0.with_scheme(scheme))
    }
}

impl Deref for DirectoryPath {
    type Target = NormalizedPath;

    fn deref(&self) -> &NormalizedPath {
        &self.0
    }
}

impl AsRef<NormalizedPath> for DirectoryPath {
    fn as_ref(&self) -> &NormalizedPath {
        &self.0
    }
}

impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DirectoryPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for DirectoryPath {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for DirectoryPath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}
