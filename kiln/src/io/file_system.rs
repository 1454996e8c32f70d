//! The file system facade: root, input and output locations plus the
//! provider registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::io::directory::{Directory, ProviderDirectory};
use crate::io::file::ProviderFile;
use crate::io::glob;
use crate::io::local::LocalFileProvider;
use crate::io::provider::FileProvider;
use crate::io::virtual_directory::{InputRoot, VirtualInputDirectory};
use crate::path::{DirectoryPath, FilePath, NormalizedPath, PathRelationship};

/// Default input path, relative to the root.
pub const DEFAULT_INPUT_PATH: &str = "input";

/// Default output path, relative to the root.
pub const DEFAULT_OUTPUT_PATH: &str = "output";

/// Resolves logical paths to concrete files and directories.
///
/// The file system holds:
/// - an absolute root path,
/// - an absolute output path (by default `<root>/output`),
/// - an ordered list of input paths, relative to the root or absolute, in
///   priority order (by default just `input`),
/// - the registry of [`FileProvider`]s keyed by scheme.
///
/// Later input paths have lower priority. When the same relative file exists
/// beneath several input paths, lookups return the one from the earliest
/// input path.
///
/// Configuration is expected to happen before concurrent use; all query
/// methods take `&self` and are safe to call from many threads.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use kiln::io::{FileSystem, InMemoryFileProvider};
/// use kiln::path::{DirectoryPath, FilePath};
///
/// let provider = InMemoryFileProvider::new()
///     .with_file("/site/theme/layout.html", "theme")
///     .unwrap()
///     .with_file("/site/input/layout.html", "site")
///     .unwrap();
///
/// let mut fs = FileSystem::new(DirectoryPath::new("/site").unwrap()).unwrap();
/// fs.register_provider("", Arc::new(provider));
/// fs.add_input_path(DirectoryPath::new("theme").unwrap());
///
/// let layout = fs.get_input_file(&FilePath::new("layout.html").unwrap()).unwrap();
/// assert_eq!(layout.read_string().unwrap(), "site");
/// ```
pub struct FileSystem {
    root_path: DirectoryPath,
    output_path: DirectoryPath,
    input_paths: Vec<DirectoryPath>,
    providers: BTreeMap<String, Arc<dyn FileProvider>>,
}

impl FileSystem {
    /// Create a file system rooted at `root_path`, with the default input
    /// and output paths and no providers registered.
    ///
    /// # Errors
    ///
    /// Fails if `root_path` is relative.
    pub fn new(root_path: DirectoryPath) -> Result<Self> {
        root_path.require_absolute()?;
        let output_path = root_path.combine(&DirectoryPath::new(DEFAULT_OUTPUT_PATH)?)?;
        Ok(Self {
            root_path,
            output_path,
            input_paths: vec![DirectoryPath::new(DEFAULT_INPUT_PATH)?],
            providers: BTreeMap::new(),
        })
    }

    /// Like [`new`](Self::new), with the local disk registered as the
    /// default provider.
    ///
    /// # Errors
    ///
    /// Fails if `root_path` is relative.
    pub fn local(root_path: DirectoryPath) -> Result<Self> {
        let mut fs = Self::new(root_path)?;
        fs.register_provider("", Arc::new(LocalFileProvider::new()));
        Ok(fs)
    }

    /// The root path.
    #[must_use]
    pub fn root_path(&self) -> &DirectoryPath {
        &self.root_path
    }

    /// Replace the root path.
    ///
    /// # Errors
    ///
    /// Fails if `path` is relative.
    pub fn set_root_path(&mut self, path: DirectoryPath) -> Result<()> {
        path.require_absolute()?;
        self.root_path = path;
        Ok(())
    }

    /// The output path.
    #[must_use]
    pub fn output_path(&self) -> &DirectoryPath {
        &self.output_path
    }

    /// Replace the output path.
    ///
    /// # Errors
    ///
    /// Fails if `path` is relative.
    pub fn set_output_path(&mut self, path: DirectoryPath) -> Result<()> {
        path.require_absolute()?;
        self.output_path = path;
        Ok(())
    }

    /// The input paths, highest priority first.
    #[must_use]
    pub fn input_paths(&self) -> &[DirectoryPath] {
        &self.input_paths
    }

    /// Mutable access to the input paths.
    pub fn input_paths_mut(&mut self) -> &mut Vec<DirectoryPath> {
        &mut self.input_paths
    }

    /// Replace the input paths.
    pub fn set_input_paths(&mut self, paths: Vec<DirectoryPath>) {
        self.input_paths = paths;
    }

    /// Append an input path with the lowest priority.
    pub fn add_input_path(&mut self, path: DirectoryPath) {
        self.input_paths.push(path);
    }

    /// Register `provider` under `scheme`, returning any provider it
    /// replaced.
    pub fn register_provider(
        &mut self,
        scheme: &str,
        provider: Arc<dyn FileProvider>,
    ) -> Option<Arc<dyn FileProvider>> {
        debug!("Registering file provider for scheme '{scheme}'");
        self.providers.insert(scheme.to_string(), provider)
    }

    /// The registered schemes.
    pub fn schemes(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// The provider responsible for an absolute path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for a relative path and
    /// [`Error::ProviderNotFound`] when no provider is registered for the
    /// path's scheme.
    pub fn get_file_provider(&self, path: &NormalizedPath) -> Result<Arc<dyn FileProvider>> {
        if path.is_relative() {
            return Err(Error::invalid_path(
                path,
                "a provider can only be selected for an absolute path",
            ));
        }
        self.providers
            .get(path.scheme())
            .cloned()
            .ok_or_else(|| Error::ProviderNotFound {
                scheme: path.scheme().to_string(),
                path: path.to_string(),
            })
    }

    /// A handle to the file at an absolute path.
    ///
    /// # Errors
    ///
    /// See [`get_file_provider`](Self::get_file_provider).
    pub fn get_file(&self, path: &FilePath) -> Result<ProviderFile> {
        Ok(ProviderFile::new(path.clone(), self.get_file_provider(path)?))
    }

    /// A handle to the directory at an absolute path.
    ///
    /// # Errors
    ///
    /// See [`get_file_provider`](Self::get_file_provider).
    pub fn get_directory(&self, path: &DirectoryPath) -> Result<ProviderDirectory> {
        Ok(ProviderDirectory::new(path.clone(), self.get_file_provider(path)?))
    }

    /// A file addressed against the root path.
    ///
    /// # Errors
    ///
    /// Fails if the path climbs above the root or has no provider.
    pub fn get_root_file(&self, path: &FilePath) -> Result<ProviderFile> {
        self.get_file(&self.root_path.combine_file(path)?)
    }

    /// A directory addressed against the root path; `None` is the root.
    ///
    /// # Errors
    ///
    /// Fails if the path climbs above the root or has no provider.
    pub fn get_root_directory(&self, path: Option<&DirectoryPath>) -> Result<ProviderDirectory> {
        match path {
            Some(path) => self.get_directory(&self.root_path.combine(path)?),
            None => self.get_directory(&self.root_path),
        }
    }

    /// The absolute output location of a path. Absolute paths are returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Fails if the combination climbs above the output path.
    pub fn get_output_path(&self, path: &FilePath) -> Result<FilePath> {
        self.output_path.combine_file(path)
    }

    /// A file addressed against the output path.
    ///
    /// # Errors
    ///
    /// Fails if the path climbs above the root or has no provider.
    pub fn get_output_file(&self, path: &FilePath) -> Result<ProviderFile> {
        self.get_file(&self.get_output_path(path)?)
    }

    /// A directory addressed against the output path; `None` is the output
    /// directory itself.
    ///
    /// # Errors
    ///
    /// Fails if the path climbs above the root or has no provider.
    pub fn get_output_directory(&self, path: Option<&DirectoryPath>) -> Result<ProviderDirectory> {
        match path {
            Some(path) => self.get_directory(&self.output_path.combine(path)?),
            None => self.get_directory(&self.output_path),
        }
    }

    /// Delete and recreate the output directory.
    ///
    /// # Errors
    ///
    /// Propagates provider failures.
    pub fn clean_output_directory(&self) -> Result<()> {
        let output = self.get_output_directory(None)?;
        info!("Cleaning output directory {}", output.path());
        output.delete()?;
        output.create()
    }

    /// The input paths made absolute against the root, highest priority
    /// first.
    ///
    /// # Errors
    ///
    /// Fails if an input path climbs above the root.
    pub fn absolute_input_paths(&self) -> Result<Vec<DirectoryPath>> {
        self.input_paths
            .iter()
            .map(|input| self.root_path.combine(input))
            .collect()
    }

    fn input_roots(&self) -> Result<Arc<[InputRoot]>> {
        self.absolute_input_paths()?
            .into_iter()
            .map(|base| {
                let provider = self.get_file_provider(&base)?;
                Ok(InputRoot { base, provider })
            })
            .collect::<Result<Vec<_>>>()
            .map(Into::into)
    }

    /// Resolve a file against the input paths.
    ///
    /// Absolute paths are returned as handles directly. Relative paths are
    /// tried against each input path in priority order and the first one
    /// that exists wins. When the file exists nowhere, the handle points at
    /// the location beneath the first input path (or the root, with no input
    /// paths configured) so callers can still create it.
    ///
    /// # Errors
    ///
    /// Fails if a path climbs above the root or has no provider.
    pub fn get_input_file(&self, path: &FilePath) -> Result<ProviderFile> {
        if path.is_absolute() {
            return self.get_file(path);
        }
        if self.input_paths.is_empty() {
            return self.get_root_file(path);
        }
        VirtualInputDirectory::new(DirectoryPath::current(), self.input_roots()?)?.file(path)
    }

    /// A directory addressed against the input paths.
    ///
    /// `None` or a relative path yields a [`VirtualInputDirectory`] spanning
    /// every input path; an absolute path yields the concrete directory.
    ///
    /// # Errors
    ///
    /// Fails if a path climbs above the root or has no provider.
    pub fn get_input_directory(&self, path: Option<&DirectoryPath>) -> Result<Box<dyn Directory>> {
        match path {
            Some(path) if path.is_absolute() => Ok(Box::new(self.get_directory(path)?)),
            Some(path) => Ok(Box::new(VirtualInputDirectory::new(
                path.clone(),
                self.input_roots()?,
            )?)),
            None => Ok(Box::new(VirtualInputDirectory::new(
                DirectoryPath::current(),
                self.input_roots()?,
            )?)),
        }
    }

    /// The concrete input directories, highest priority first.
    ///
    /// # Errors
    ///
    /// Fails if an input path climbs above the root or has no provider.
    pub fn get_input_directories(&self) -> Result<Vec<ProviderDirectory>> {
        self.absolute_input_paths()?
            .iter()
            .map(|path| self.get_directory(path))
            .collect()
    }

    /// The absolute input path containing `path`.
    ///
    /// When input paths are nested, the most specific one wins. Returns
    /// `None` if the path lies beneath no input path.
    ///
    /// # Errors
    ///
    /// Fails for a relative `path`, or if an input path climbs above the
    /// root.
    pub fn get_containing_input_path(
        &self,
        path: &NormalizedPath,
    ) -> Result<Option<DirectoryPath>> {
        if path.is_relative() {
            return Err(Error::invalid_path(
                path,
                "the containing input path can only be found for an absolute path",
            ));
        }
        let mut best: Option<DirectoryPath> = None;
        for input in self.absolute_input_paths()? {
            let longer = best
                .as_ref()
                .map_or(true, |b| input.segments().len() > b.segments().len());
            if PathRelationship::is_within(path, &input) && longer {
                best = Some(input);
            }
        }
        Ok(best)
    }

    /// Evaluate glob patterns against `directory`.
    ///
    /// # Errors
    ///
    /// See [`glob::get_files`].
    pub fn get_files<S: AsRef<str>>(
        &self,
        directory: &dyn Directory,
        patterns: &[S],
    ) -> Result<Vec<ProviderFile>> {
        glob::get_files(self, directory, patterns)
    }

    /// Evaluate glob patterns against the virtual input root.
    ///
    /// # Errors
    ///
    /// See [`glob::get_files`].
    pub fn get_input_files<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Vec<ProviderFile>> {
        let input = self.get_input_directory(None)?;
        self.get_files(input.as_ref(), patterns)
    }
}

impl fmt::Debug for FileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSystem")
            .field("root_path", &self.root_path.to_string())
            .field("output_path", &self.output_path.to_string())
            .field(
                "input_paths",
                &self.input_paths.iter().map(ToString::to_string).collect::<Vec<_>>(),
            )
            .field("schemes", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
