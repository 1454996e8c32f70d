//! The default provider, backed by the local disk.

use std::fs;
use std::io;

use log::trace;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::io::provider::{name_matcher, FileProvider, ReadStream, WriteStream};
use crate::path::normalize::{directory_from_std, file_from_std};
use crate::path::{DirectoryPath, FilePath};

/// A [`FileProvider`] over the local file system.
///
/// The scheme of incoming paths is ignored; enumerated paths are tagged with
/// the scheme of the directory being enumerated.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileProvider;

impl LocalFileProvider {
    /// Create a local provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn walker(directory: &DirectoryPath, recursive: bool) -> WalkDir {
    let depth = if recursive { usize::MAX } else { 1 };
    WalkDir::new(directory.to_std_path())
        .min_depth(1)
        .max_depth(depth)
        .sort_by_file_name()
}

fn walk_error(err: walkdir::Error) -> Error {
    Error::Io(err.into())
}

fn not_found(path: &FilePath, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::FileNotFound {
            path: path.to_string(),
        }
    } else {
        Error::Io(err)
    }
}

impl FileProvider for LocalFileProvider {
    fn file_exists(&self, path: &FilePath) -> bool {
        path.to_std_path().is_file()
    }

    fn directory_exists(&self, path: &DirectoryPath) -> bool {
        path.to_std_path().is_dir()
    }

    fn files(
        &self,
        directory: &DirectoryPath,
        search_pattern: &str,
        recursive: bool,
    ) -> Result<Vec<FilePath>> {
        if !self.directory_exists(directory) {
            return Ok(Vec::new());
        }
        let matcher = name_matcher(search_pattern)?;
        trace!("Listing files in {directory} (recursive: {recursive})");

        let mut files = Vec::new();
        for entry in walker(directory, recursive) {
            let entry = entry.map_err(walk_error)?;
            if !entry.file_type().is_file() || !matcher.is_match(entry.file_name()) {
                continue;
            }
            files.push(file_from_std(entry.path())?.with_scheme(directory.scheme()));
        }
        Ok(files)
    }

    fn directories(
        &self,
        directory: &DirectoryPath,
        recursive: bool,
    ) -> Result<Vec<DirectoryPath>> {
        if !self.directory_exists(directory) {
            return Ok(Vec::new());
        }

        let mut directories = Vec::new();
        for entry in walker(directory, recursive) {
            let entry = entry.map_err(walk_error)?;
            if entry.file_type().is_dir() {
                directories.push(directory_from_std(entry.path())?.with_scheme(directory.scheme()));
            }
        }
        Ok(directories)
    }

    fn open_read(&self, path: &FilePath) -> Result<ReadStream> {
        let file = fs::File::open(path.to_std_path()).map_err(|e| not_found(path, e))?;
        Ok(Box::new(io::BufReader::new(file)))
    }

    fn open_write(&self, path: &FilePath) -> Result<WriteStream> {
        let target = path.to_std_path();
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Box::new(fs::File::create(target)?))
    }

    fn create_directory(&self, path: &DirectoryPath) -> Result<()> {
        fs::create_dir_all(path.to_std_path())?;
        Ok(())
    }

    fn delete_file(&self, path: &FilePath) -> Result<()> {
        match fs::remove_file(path.to_std_path()) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn delete_directory(&self, path: &DirectoryPath, recursive: bool) -> Result<()> {
        let target = path.to_std_path();
        if !target.is_dir() {
            return Ok(());
        }
        if recursive {
            fs::remove_dir_all(target)?;
        } else {
            fs::remove_dir(target)?;
        }
        Ok(())
    }

    fn file_length(&self, path: &FilePath) -> Result<u64> {
        let metadata = fs::metadata(path.to_std_path()).map_err(|e| not_found(path, e))?;
        Ok(metadata.len())
    }
}
