//! An in-memory provider, used for tests and for generated content that
//! never touches disk.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor, Write};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::io::provider::{name_matcher, FileProvider, ReadStream, WriteStream};
use crate::path::{DirectoryPath, FilePath, NormalizedPath};

type FileMap = Arc<RwLock<BTreeMap<NormalizedPath, Vec<u8>>>>;

/// A [`FileProvider`] holding files in a shared map.
///
/// Directories exist implicitly above every stored file, or explicitly once
/// created. Cloning the provider shares the underlying storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryFileProvider {
    files: FileMap,
    directories: Arc<RwLock<BTreeSet<NormalizedPath>>>,
}

fn key(path: &NormalizedPath) -> NormalizedPath {
    path.with_scheme("")
}

impl InMemoryFileProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `contents` at `path`, replacing any existing file.
    pub fn insert(&self, path: &FilePath, contents: impl Into<Vec<u8>>) {
        self.files.write().insert(key(path), contents.into());
    }

    /// Builder-style [`insert`](Self::insert) taking path text.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a valid file path.
    pub fn with_file(self, path: &str, contents: impl Into<Vec<u8>>) -> Result<Self> {
        self.insert(&FilePath::new(path)?, contents);
        Ok(self)
    }

    /// The stored bytes of a file, if present.
    #[must_use]
    pub fn contents(&self, path: &FilePath) -> Option<Vec<u8>> {
        self.files.read().get(&key(path)).cloned()
    }

    /// Number of stored files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// Whether no files are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    fn known_directories(&self) -> BTreeSet<NormalizedPath> {
        let mut known = self.directories.read().clone();
        for file in self.files.read().keys() {
            let mut current = file.parent_parts();
            while let Some(dir) = current {
                current = dir.parent_parts();
                known.insert(dir);
            }
        }
        known
    }
}

fn depth_ok(directory: &NormalizedPath, path: &NormalizedPath, recursive: bool) -> bool {
    let depth = path.segments().len() - directory.segments().len();
    depth >= 1 && (recursive || depth == 1)
}

impl FileProvider for InMemoryFileProvider {
    fn file_exists(&self, path: &FilePath) -> bool {
        self.files.read().contains_key(&key(path))
    }

    fn directory_exists(&self, path: &DirectoryPath) -> bool {
        let dir = key(path);
        dir.segments().is_empty()
            || self.directories.read().contains(&dir)
            || self.files.read().keys().any(|file| dir.contains(file))
    }

    fn files(
        &self,
        directory: &DirectoryPath,
        search_pattern: &str,
        recursive: bool,
    ) -> Result<Vec<FilePath>> {
        let matcher = name_matcher(search_pattern)?;
        let dir = key(directory);
        self.files
            .read()
            .keys()
            .filter(|file| dir.contains(file) && depth_ok(&dir, file, recursive))
            .filter(|file| file.name().is_some_and(|name| matcher.is_match(name)))
            .map(|file| FilePath::from_normalized(file.with_scheme(directory.scheme())))
            .collect()
    }

    fn directories(
        &self,
        directory: &DirectoryPath,
        recursive: bool,
    ) -> Result<Vec<DirectoryPath>> {
        let dir = key(directory);
        Ok(self
            .known_directories()
            .into_iter()
            .filter(|candidate| dir.contains(candidate) && depth_ok(&dir, candidate, recursive))
            .map(|candidate| DirectoryPath::from_normalized(candidate.with_scheme(directory.scheme())))
            .collect())
    }

    fn open_read(&self, path: &FilePath) -> Result<ReadStream> {
        let bytes = self.contents(path).ok_or_else(|| Error::FileNotFound {
            path: path.to_string(),
        })?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn open_write(&self, path: &FilePath) -> Result<WriteStream> {
        let target = key(path);
        self.files.write().insert(target.clone(), Vec::new());
        Ok(Box::new(MemoryWriter {
            target,
            files: Arc::clone(&self.files),
        }))
    }

    fn create_directory(&self, path: &DirectoryPath) -> Result<()> {
        let mut current = Some(key(path));
        let mut directories = self.directories.write();
        while let Some(dir) = current {
            if dir.segments().is_empty() {
                break;
            }
            current = dir.parent_parts();
            directories.insert(dir);
        }
        Ok(())
    }

    fn delete_file(&self, path: &FilePath) -> Result<()> {
        self.files.write().remove(&key(path));
        Ok(())
    }

    fn delete_directory(&self, path: &DirectoryPath, recursive: bool) -> Result<()> {
        let dir = key(path);
        let mut files = self.files.write();
        let has_children = files.keys().any(|file| dir.contains(file));
        if has_children && !recursive {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::Other,
                format!("directory {path} is not empty"),
            )));
        }
        files.retain(|file, _| !dir.contains(file));
        self.directories
            .write()
            .retain(|candidate| !dir.contains(candidate));
        Ok(())
    }

    fn file_length(&self, path: &FilePath) -> Result<u64> {
        self.files
            .read()
            .get(&key(path))
            .map(|bytes| bytes.len() as u64)
            .ok_or_else(|| Error::FileNotFound {
                path: path.to_string(),
            })
    }
}

/// Appends written bytes straight into the shared map.
struct MemoryWriter {
    target: NormalizedPath,
    files: FileMap,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.files
            .write()
            .entry(self.target.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
