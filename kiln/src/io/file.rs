//! File handles bound to a provider.

use std::fmt;
use std::io::{self, Read, Write};
use std::sync::Arc;

use crate::error::Result;
use crate::io::directory::ProviderDirectory;
use crate::io::provider::{FileProvider, ReadStream, WriteStream};
use crate::path::FilePath;

/// A file location paired with the provider that owns it.
///
/// Handles are cheap to clone and do not touch storage until asked.
#[derive(Clone)]
pub struct ProviderFile {
    path: FilePath,
    provider: Arc<dyn FileProvider>,
}

impl ProviderFile {
    /// Bind `path` to `provider`.
    #[must_use]
    pub fn new(path: FilePath, provider: Arc<dyn FileProvider>) -> Self {
        Self { path, provider }
    }

    /// The absolute path of the file.
    #[must_use]
    pub fn path(&self) -> &FilePath {
        &self.path
    }

    /// The owning provider.
    #[must_use]
    pub fn provider(&self) -> &Arc<dyn FileProvider> {
        &self.provider
    }

    /// Whether the file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.provider.file_exists(&self.path)
    }

    /// The directory containing the file, under the same provider.
    #[must_use]
    pub fn directory(&self) -> ProviderDirectory {
        ProviderDirectory::new(self.path.directory(), Arc::clone(&self.provider))
    }

    /// Length of the file in bytes.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist.
    pub fn length(&self) -> Result<u64> {
        self.provider.file_length(&self.path)
    }

    /// Open the file for reading.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist or cannot be opened.
    pub fn open_read(&self) -> Result<ReadStream> {
        self.provider.open_read(&self.path)
    }

    /// Open the file for writing, truncating it.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be created.
    pub fn open_write(&self) -> Result<WriteStream> {
        self.provider.open_write(&self.path)
    }

    /// Read the whole file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.open_read()?.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Read the whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid UTF-8.
    pub fn read_string(&self) -> Result<String> {
        let mut text = String::new();
        self.open_read()?.read_to_string(&mut text)?;
        Ok(text)
    }

    /// Replace the file contents.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        let mut writer = self.open_write()?;
        writer.write_all(bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Stream this file into `destination`, which may live under another
    /// provider. Returns the number of bytes copied.
    ///
    /// # Errors
    ///
    /// Fails if either side cannot be opened or the copy is interrupted.
    pub fn copy_to(&self, destination: &ProviderFile) -> Result<u64> {
        let mut reader = self.open_read()?;
        let mut writer = destination.open_write()?;
        let copied = io::copy(&mut reader, &mut writer)?;
        writer.flush()?;
        Ok(copied)
    }

    /// Delete the file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Fails if the provider cannot remove it.
    pub fn delete(&self) -> Result<()> {
        self.provider.delete_file(&self.path)
    }
}

impl fmt::Debug for ProviderFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderFile")
            .field("path", &self.path.to_string())
            .field("provider", &self.provider)
            .finish()
    }
}

impl fmt::Display for ProviderFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.path.fmt(f)
    }
}

impl PartialEq for ProviderFile {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for ProviderFile {}
