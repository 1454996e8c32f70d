//! The merged view over all input paths.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::error::{Error, Result};
use crate::io::directory::{Directory, ProviderDirectory};
use crate::io::file::ProviderFile;
use crate::io::provider::FileProvider;
use crate::path::{DirectoryPath, FilePath};

/// One concrete input root: an absolute directory and its provider.
#[derive(Clone)]
pub(crate) struct InputRoot {
    pub(crate) base: DirectoryPath,
    pub(crate) provider: Arc<dyn FileProvider>,
}

/// A directory addressed relative to every input path at once.
///
/// A virtual input directory has a relative path and stands for the same
/// relative location beneath each input root. Listing unions the concrete
/// directories in input-path order; single lookups take the first root where
/// the target exists.
///
/// The set of roots is captured when the directory is created, so later
/// changes to the file system's input paths do not affect it.
#[derive(Clone)]
pub struct VirtualInputDirectory {
    path: DirectoryPath,
    roots: Arc<[InputRoot]>,
}

impl VirtualInputDirectory {
    pub(crate) fn new(path: DirectoryPath, roots: Arc<[InputRoot]>) -> Result<Self> {
        if path.is_absolute() {
            return Err(Error::invalid_path(
                &path,
                "virtual input directories take relative paths",
            ));
        }
        Ok(Self { path, roots })
    }

    /// The concrete directories this virtual directory stands for, in
    /// priority order.
    ///
    /// # Errors
    ///
    /// Fails if the relative path climbs above an input root.
    pub fn concrete_directories(&self) -> Result<Vec<ProviderDirectory>> {
        self.roots
            .iter()
            .map(|root| {
                root.base
                    .combine(&self.path)
                    .map(|path| ProviderDirectory::new(path, Arc::clone(&root.provider)))
            })
            .collect()
    }

    fn with_path(&self, path: DirectoryPath) -> Self {
        Self {
            path,
            roots: Arc::clone(&self.roots),
        }
    }
}

impl Directory for VirtualInputDirectory {
    fn path(&self) -> &DirectoryPath {
        &self.path
    }

    fn exists(&self) -> bool {
        self.concrete_directories()
            .map(|dirs| dirs.iter().any(Directory::exists))
            .unwrap_or(false)
    }

    fn files(&self, recursive: bool) -> Result<Vec<ProviderFile>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for dir in self.concrete_directories()? {
            if !dir.exists() {
                trace!("Skipping missing input directory {}", dir.path());
                continue;
            }
            for file in dir.files(recursive)? {
                if seen.insert(file.path().clone()) {
                    files.push(file);
                }
            }
        }
        Ok(files)
    }

    fn directories(&self, recursive: bool) -> Result<Vec<Box<dyn Directory>>> {
        let mut seen = HashSet::new();
        let mut directories: Vec<Box<dyn Directory>> = Vec::new();
        for dir in self.concrete_directories()? {
            if !dir.exists() {
                continue;
            }
            for sub in dir.directories(recursive)? {
                let relative = dir.path().relative_directory(sub.path())?;
                let path = self.path.combine(&relative)?;
                if seen.insert(path.clone()) {
                    directories.push(Box::new(self.with_path(path)));
                }
            }
        }
        Ok(directories)
    }

    fn file(&self, path: &FilePath) -> Result<ProviderFile> {
        if path.is_absolute() {
            return Err(Error::invalid_path(
                path,
                "virtual input directories resolve relative paths only",
            ));
        }

        let concrete = self.concrete_directories()?;
        let mut first = None;
        for dir in &concrete {
            let candidate = dir.file(path)?;
            if candidate.exists() {
                return Ok(candidate);
            }
            first.get_or_insert(candidate);
        }
        first.ok_or_else(|| Error::missing("input paths"))
    }

    fn directory(&self, path: &DirectoryPath) -> Result<Box<dyn Directory>> {
        if path.is_absolute() {
            return Err(Error::invalid_path(
                path,
                "virtual input directories resolve relative paths only",
            ));
        }
        Ok(Box::new(self.with_path(self.path.combine(path)?)))
    }

    fn parent(&self) -> Option<Box<dyn Directory>> {
        self.path
            .parent()
            .map(|parent| Box::new(self.with_path(parent)) as Box<dyn Directory>)
    }

    fn relative_path_of(&self, file: &FilePath) -> Option<FilePath> {
        self.concrete_directories()
            .ok()?
            .iter()
            .find_map(|dir| dir.relative_path_of(file))
    }

    fn create(&self) -> Result<()> {
        self.concrete_directories()?
            .first()
            .ok_or_else(|| Error::missing("input paths"))?
            .create()
    }
}

impl fmt::Debug for VirtualInputDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bases: Vec<String> = self.roots.iter().map(|r| r.base.to_string()).collect();
        f.debug_struct("VirtualInputDirectory")
            .field("path", &self.path.to_string())
            .field("roots", &bases)
            .finish()
    }
}
