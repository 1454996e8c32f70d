//! Directory handles.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::io::file::ProviderFile;
use crate::io::provider::FileProvider;
use crate::path::{DirectoryPath, FilePath, NormalizedPath};

/// A directory that can be listed and navigated.
///
/// Implemented by [`ProviderDirectory`] for concrete locations and by
/// [`VirtualInputDirectory`](crate::io::VirtualInputDirectory) for the
/// merged view over all input paths.
pub trait Directory: Send + Sync + fmt::Debug {
    /// The path of this directory. Relative for virtual directories.
    fn path(&self) -> &DirectoryPath;

    /// Whether the directory exists.
    fn exists(&self) -> bool;

    /// Files beneath this directory.
    ///
    /// # Errors
    ///
    /// Propagates provider listing failures.
    fn files(&self, recursive: bool) -> Result<Vec<ProviderFile>>;

    /// Subdirectories of this directory.
    ///
    /// # Errors
    ///
    /// Propagates provider listing failures.
    fn directories(&self, recursive: bool) -> Result<Vec<Box<dyn Directory>>>;

    /// A file addressed relative to this directory.
    ///
    /// # Errors
    ///
    /// Fails for absolute paths under another scheme, or when the combination
    /// climbs above the root.
    fn file(&self, path: &FilePath) -> Result<ProviderFile>;

    /// A directory addressed relative to this one.
    ///
    /// # Errors
    ///
    /// Fails for absolute paths under another scheme, or when the combination
    /// climbs above the root.
    fn directory(&self, path: &DirectoryPath) -> Result<Box<dyn Directory>>;

    /// The parent directory, if any.
    fn parent(&self) -> Option<Box<dyn Directory>>;

    /// The path of `file` relative to this directory, if the file lies
    /// beneath it.
    fn relative_path_of(&self, file: &FilePath) -> Option<FilePath>;

    /// Create the directory.
    ///
    /// # Errors
    ///
    /// Propagates provider failures.
    fn create(&self) -> Result<()>;
}

/// A concrete directory owned by one provider.
#[derive(Clone)]
pub struct ProviderDirectory {
    path: DirectoryPath,
    provider: Arc<dyn FileProvider>,
}

impl ProviderDirectory {
    /// Bind `path` to `provider`.
    #[must_use]
    pub fn new(path: DirectoryPath, provider: Arc<dyn FileProvider>) -> Self {
        Self { path, provider }
    }

    /// The owning provider.
    #[must_use]
    pub fn provider(&self) -> &Arc<dyn FileProvider> {
        &self.provider
    }

    /// Files whose name matches a single-segment `search_pattern`.
    ///
    /// # Errors
    ///
    /// Propagates provider failures and malformed patterns.
    pub fn files_matching(&self, search_pattern: &str, recursive: bool) -> Result<Vec<ProviderFile>> {
        Ok(self
            .provider
            .files(&self.path, search_pattern, recursive)?
            .into_iter()
            .map(|path| ProviderFile::new(path, Arc::clone(&self.provider)))
            .collect())
    }

    /// Delete the directory and everything beneath it.
    ///
    /// # Errors
    ///
    /// Propagates provider failures.
    pub fn delete(&self) -> Result<()> {
        self.provider.delete_directory(&self.path, true)
    }

    fn resolve(&self, path: &NormalizedPath) -> Result<NormalizedPath> {
        if path.is_absolute() && path.scheme() != self.path.scheme() {
            return Err(Error::invalid_path(
                path,
                format!("not addressable from directory {}", self.path),
            ));
        }
        self.path.as_normalized().combine(path)
    }
}

impl Directory for ProviderDirectory {
    fn path(&self) -> &DirectoryPath {
        &self.path
    }

    fn exists(&self) -> bool {
        self.provider.directory_exists(&self.path)
    }

    fn files(&self, recursive: bool) -> Result<Vec<ProviderFile>> {
        self.files_matching("*", recursive)
    }

    fn directories(&self, recursive: bool) -> Result<Vec<Box<dyn Directory>>> {
        Ok(self
            .provider
            .directories(&self.path, recursive)?
            .into_iter()
            .map(|path| Box::new(Self::new(path, Arc::clone(&self.provider))) as Box<dyn Directory>)
            .collect())
    }

    fn file(&self, path: &FilePath) -> Result<ProviderFile> {
        let resolved = FilePath::from_normalized(self.resolve(path)?)?;
        Ok(ProviderFile::new(resolved, Arc::clone(&self.provider)))
    }

    fn directory(&self, path: &DirectoryPath) -> Result<Box<dyn Directory>> {
        let resolved = DirectoryPath::from_normalized(self.resolve(path)?);
        Ok(Box::new(Self::new(resolved, Arc::clone(&self.provider))))
    }

    fn parent(&self) -> Option<Box<dyn Directory>> {
        self.path
            .parent()
            .map(|parent| Box::new(Self::new(parent, Arc::clone(&self.provider))) as Box<dyn Directory>)
    }

    fn relative_path_of(&self, file: &FilePath) -> Option<FilePath> {
        if !self.path.contains(file) {
            return None;
        }
        self.path.relative_file(file).ok()
    }

    fn create(&self) -> Result<()> {
        self.provider.create_directory(&self.path)
    }
}

impl fmt::Debug for ProviderDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDirectory")
            .field("path", &self.path.to_string())
            .field("provider", &self.provider)
            .finish()
    }
}
