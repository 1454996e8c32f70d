//! The document type.

use std::fmt;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace};
use uuid::Uuid;

use crate::document::content::{ContentGuard, Release, SharedContent, SlotGuard};
use crate::error::{Error, Result};
use crate::metadata::{MetadataStack, Value};
use crate::path::FilePath;

/// A unit of content: metadata layered over a shared content stream.
///
/// Documents are immutable. "Changing" one means asking the
/// [`DocumentFactory`](crate::document::DocumentFactory) for a clone, which
/// keeps the identity, may push a metadata layer, and either shares the
/// parent's stream or binds a new one.
///
/// Exactly one document in a lineage is responsible for releasing a given
/// stream. A clone that shares its parent's stream takes that
/// responsibility over; a clone with new content is responsible for its own
/// stream only.
pub struct Document {
    id: Uuid,
    source: Option<FilePath>,
    metadata: MetadataStack,
    content: Arc<SharedContent>,
    owns_content: AtomicBool,
    disposed: AtomicBool,
}

impl Document {
    pub(crate) fn new(
        id: Uuid,
        source: Option<FilePath>,
        metadata: MetadataStack,
        content: Arc<SharedContent>,
        owns_content: bool,
    ) -> Self {
        Self {
            id,
            source,
            metadata,
            content,
            owns_content: AtomicBool::new(owns_content),
            disposed: AtomicBool::new(false),
        }
    }

    /// The lineage identity.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Where the document came from, if known.
    #[must_use]
    pub fn source(&self) -> Option<&FilePath> {
        self.source.as_ref()
    }

    /// The metadata stack. Readable even after disposal.
    #[must_use]
    pub fn metadata(&self) -> &MetadataStack {
        &self.metadata
    }

    /// Shortcut for `metadata().get(key)`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.metadata.get(key)
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Whether this document is currently responsible for releasing its
    /// stream.
    #[must_use]
    pub fn owns_content(&self) -> bool {
        self.owns_content.load(Ordering::Acquire)
    }

    /// Whether both documents read from the same stream.
    #[must_use]
    pub fn shares_content_with(&self, other: &Document) -> bool {
        Arc::ptr_eq(&self.content, &other.content)
    }

    pub(crate) fn shared_content(&self) -> &Arc<SharedContent> {
        &self.content
    }

    /// Hand release responsibility to a clone. Returns whether this document
    /// held it.
    pub(crate) fn transfer_ownership(&self) -> bool {
        let owned = self.owns_content.swap(false, Ordering::AcqRel);
        if owned {
            trace!("Document {} hands stream ownership to a clone", self.id);
        }
        owned
    }

    fn source_label(&self) -> Option<String> {
        self.source.as_ref().map(ToString::to_string)
    }

    pub(crate) fn disposed_error(&self) -> Error {
        Error::DocumentDisposed {
            id: self.id.to_string(),
            source_path: self.source_label(),
        }
    }

    fn released_error(&self) -> Error {
        Error::StreamReleased {
            id: self.id.to_string(),
            source_path: self.source_label(),
        }
    }

    fn guard<'a>(&'a self, slot: SlotGuard<'a>) -> Result<ContentGuard<'a>> {
        if slot.is_none() {
            return Err(self.released_error());
        }
        Ok(ContentGuard::new(slot)?)
    }

    /// Exclusive access to the content stream, rewound to the start.
    ///
    /// Blocks while another document sharing the stream holds it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentDisposed`] after disposal and
    /// [`Error::StreamReleased`] when the shared stream was released by the
    /// document owning it.
    pub fn stream(&self) -> Result<ContentGuard<'_>> {
        if self.is_disposed() {
            return Err(self.disposed_error());
        }
        self.guard(self.content.lock())
    }

    /// Like [`stream`](Self::stream), giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Additionally returns [`Error::StreamTimeout`] when the stream stays
    /// busy.
    pub fn stream_timeout(&self, timeout: Duration) -> Result<ContentGuard<'_>> {
        if self.is_disposed() {
            return Err(self.disposed_error());
        }
        let slot = self
            .content
            .try_lock_for(timeout)
            .ok_or_else(|| Error::StreamTimeout {
                id: self.id.to_string(),
                millis: timeout.as_millis(),
            })?;
        self.guard(slot)
    }

    /// The whole content.
    ///
    /// # Errors
    ///
    /// See [`stream`](Self::stream).
    pub fn content_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.stream()?.read_all()?)
    }

    /// The whole content as UTF-8 text.
    ///
    /// # Errors
    ///
    /// See [`stream`](Self::stream); also fails on invalid UTF-8.
    pub fn content_string(&self) -> Result<String> {
        let mut text = String::new();
        self.stream()?.read_to_string(&mut text)?;
        Ok(text)
    }

    /// Whether the content is non-empty.
    ///
    /// # Errors
    ///
    /// See [`stream`](Self::stream).
    pub fn has_content(&self) -> Result<bool> {
        let mut first = [0u8; 1];
        Ok(self.stream()?.read(&mut first)? > 0)
    }

    /// Release the stream if this document owns it.
    ///
    /// Never blocks. If the stream is locked, including by a guard this
    /// thread still holds, it is released when that guard is dropped.
    /// Metadata stays readable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentDisposed`] when called twice.
    pub fn dispose(&self) -> Result<()> {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return Err(self.disposed_error());
        }
        if self.owns_content.swap(false, Ordering::AcqRel) {
            match self.content.release() {
                Release::Released => debug!("Released content stream of document {}", self.id),
                Release::Deferred => debug!(
                    "Content stream of document {} is in use; releasing when unlocked",
                    self.id
                ),
                Release::AlreadyReleased => {}
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("source", &self.source_label())
            .field("metadata", &self.metadata)
            .field("content", &self.content)
            .field("owns_content", &self.owns_content())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{source} ({})", self.id),
            None => write!(f, "{}", self.id),
        }
    }
}
