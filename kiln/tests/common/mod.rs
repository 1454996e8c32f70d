//! Common test utilities for integration tests.
//!
//! This module provides fixture builders for in-memory and on-disk sites.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kiln::config::{Config, ConfigBuilder};
use kiln::{DirectoryPath, Engine, FilePath, FileSystem, InMemoryFileProvider};

/// Parse an absolute or relative directory path.
#[allow(dead_code)]
pub fn dir(raw: &str) -> DirectoryPath {
    DirectoryPath::new(raw).unwrap()
}

/// Parse an absolute or relative file path.
#[allow(dead_code)]
pub fn file(raw: &str) -> FilePath {
    FilePath::new(raw).unwrap()
}

/// A file system rooted at `root` whose default provider is an in-memory
/// store holding `files`.
#[allow(dead_code)]
pub fn memory_fs(root: &str, files: &[&str]) -> (InMemoryFileProvider, FileSystem) {
    let memory = InMemoryFileProvider::new();
    for path in files {
        memory.insert(&file(path), path.as_bytes());
    }
    let mut fs = FileSystem::new(dir(root)).unwrap();
    fs.register_provider("", Arc::new(memory.clone()));
    (memory, fs)
}

/// Builder for an on-disk site in a temporary directory.
///
/// # Examples
///
/// ```no_run
/// # use common::SiteFixture;
/// let site = SiteFixture::new()
///     .with_file("input/index.md", "# Home")
///     .with_file("kiln.yaml", "clean_output: true\n");
/// let engine = site.engine();
/// ```
#[allow(dead_code)]
pub struct SiteFixture {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl SiteFixture {
    /// Creates an empty site.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Writes a file relative to the site root, creating directories.
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    /// The site root on disk.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// A path beneath the site root.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Configuration from the site's files only.
    pub fn config(&self) -> Config {
        ConfigBuilder::new()
            .with_working_dir(self.root())
            .skip_env()
            .build()
            .unwrap()
    }

    /// An engine over the site's configuration, rooted at the site.
    pub fn engine(&self) -> Engine {
        Engine::from_config(&self.config(), self.root()).unwrap()
    }
}
