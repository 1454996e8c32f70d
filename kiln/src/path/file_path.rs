//! File paths: a normalized path whose last segment is a file name.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::path::{DirectoryPath, NormalizedPath};

/// A normalized path that names a file.
///
/// # Examples
///
/// ```
/// use kiln::path::FilePath;
///
/// let path = FilePath::new("/site/input/posts/hello.md").unwrap();
/// assert_eq!(path.file_name(), "hello.md");
/// assert_eq!(path.extension(), Some("md"));
/// assert_eq!(path.change_extension("html").unwrap().to_string(), "/site/input/posts/hello.html");
/// assert_eq!(path.directory().to_string(), "/site/input/posts");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilePath(NormalizedPath);

impl FilePath {
    /// Parse a file path.
    ///
    /// # Errors
    ///
    /// Fails if the string is empty, climbs above an absolute root, or does
    /// not end in a file name.
    pub fn new(raw: &str) -> Result<Self> {
        Self::from_normalized(NormalizedPath::parse(raw)?)
    }

    /// Wrap a normalized path, checking that it names a file.
    ///
    /// # Errors
    ///
    /// Fails if the path has no final file-name segment.
    pub fn from_normalized(path: NormalizedPath) -> Result<Self> {
        match path.name() {
            Some(name) if name != ".." && !is_drive_root(&path) => Ok(Self(path)),
            _ => Err(Error::invalid_path(&path, "a file path must end in a file name")),
        }
    }

    /// Parse a path that must be absolute.
    ///
    /// # Errors
    ///
    /// Fails for relative paths in addition to the [`FilePath::new`] cases.
    pub fn absolute(raw: &str) -> Result<Self> {
        let path = Self::new(raw)?;
        path.require_absolute()?;
        Ok(path)
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

    /// The file name including its extension.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.name().unwrap_or_default()
    }

    /// The file name as a relative path of its own.
    #[must_use]
    pub fn file_name_path(&self) -> FilePath {
        Self(NormalizedPath::single(self.file_name()))
    }

    /// The file name with its extension removed.
    #[must_use]
    pub fn file_name_without_extension(&self) -> &str {
        let name = self.file_name();
        match extension_index(name) {
            Some(idx) => &name[..idx],
            None => name,
        }
    }

    /// The extension without its leading dot, if there is one.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        extension_index(name).map(|idx| &name[idx + 1..])
    }

    /// Whether the file name has an extension.
    #[must_use]
    pub fn has_extension(&self) -> bool {
        self.extension().is_some()
    }

    /// Replace the extension. A leading dot on `extension` is ignored, and an
    /// empty extension strips it.
    ///
    /// # Errors
    ///
    /// Fails if the resulting file name is not a single valid segment.
    pub fn change_extension(&self, extension: &str) -> Result<FilePath> {
        let extension = extension.trim_start_matches('.');
        let stem = self.file_name_without_extension();
        if extension.is_empty() {
            return self.change_file_name(stem);
        }
        self.change_file_name(&format!("{stem}.{extension}"))
    }

    /// Remove the extension.
    ///
    /// # Errors
    ///
    /// Fails if only `.` would remain of the file name.
    pub fn strip_extension(&self) -> Result<FilePath> {
        self.change_extension("")
    }

    /// Add another extension after the current one (`a.tar` → `a.tar.gz`).
    ///
    /// # Errors
    ///
    /// Fails if `extension` contains a separator.
    pub fn append_extension(&self, extension: &str) -> Result<FilePath> {
        let extension = extension.trim_start_matches('.');
        if extension.is_empty() {
            return Ok(self.clone());
        }
        self.change_file_name(&format!("{}.{extension}", self.file_name()))
    }

    /// Insert text between the stem and the extension (`a.txt` → `a-b.txt`).
    ///
    /// # Errors
    ///
    /// Fails if `suffix` contains a separator.
    pub fn insert_suffix(&self, suffix: &str) -> Result<FilePath> {
        let name = match self.extension() {
            Some(ext) => format!("{}{suffix}.{ext}", self.file_name_without_extension()),
            None => format!("{}{suffix}", self.file_name()),
        };
        self.change_file_name(&name)
    }

    /// Replace the file name, keeping the directory.
    ///
    /// # Errors
    ///
    /// Fails if `name` is empty, `.` or `..`, or contains a separator.
    pub fn change_file_name(&self, name: &str) -> Result<FilePath> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::invalid_path(name, "not a valid file name"));
        }
        Ok(Self(self.0.with_last_segment(name)))
    }

    /// The directory containing this file.
    ///
    /// For a bare relative file name this is the current directory (`.`).
    #[must_use]
    pub fn directory(&self) -> DirectoryPath {
        let parent = self
            .0
            .parent_parts()
            .unwrap_or_else(|| self.0.clone());
        DirectoryPath::from_normalized(parent)
    }

    /// The same file under another provider scheme.
    #[must_use]
    pub fn with_scheme(&self, scheme: &str) -> FilePath {
        Self(self.0.with_scheme(scheme))
    }
}

fn is_drive_root(path: &NormalizedPath) -> bool {
    path.is_absolute() && path.segments().len() == 1 && path.segments()[0].ends_with(':')
}

/// Index of the dot that starts the extension. Leading dots (`.htaccess`)
/// do not count.
fn extension_index(name: &str) -> Option<usize> {
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) if idx + 1 == name.len() => None,
        Some(idx) => Some(idx),
    }
}

impl Deref for FilePath {
    type Target = NormalizedPath;

    fn deref(&self) -> &NormalizedPath {
        &self.0
    }
}

impl AsRef<NormalizedPath> for FilePath {
    fn as_ref(&self) -> &NormalizedPath {
        &self.0
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for FilePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for FilePath {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for FilePath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}
