//! Shared, lock-guarded content streams.

use std::fmt;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};

/// A seekable, readable and writable stream that can move between threads.
pub trait ContentStream: Read + Write + Seek + Send {}

impl<T: Read + Write + Seek + Send> ContentStream for T {}

/// Content handed to the document factory.
pub struct Content(Box<dyn ContentStream>);

impl Content {
    /// Wrap an arbitrary stream.
    pub fn new<S: ContentStream + 'static>(stream: S) -> Self {
        Self(Box::new(stream))
    }

    /// In-memory content.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::new(Cursor::new(bytes))
    }

    /// Empty in-memory content.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_bytes(Vec::new())
    }

    pub(crate) fn into_stream(self) -> Box<dyn ContentStream> {
        self.0
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::from_bytes(text.into_bytes())
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes().to_vec())
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Content(..)")
    }
}

type Slot = Option<Box<dyn ContentStream>>;

/// Outcome of [`SharedContent::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Release {
    /// The stream was dropped.
    Released,
    /// The stream is locked; it is dropped when the holder unlocks it.
    Deferred,
    /// The stream had already been dropped.
    AlreadyReleased,
}

/// A stream plus the lock serializing access to it, shared by every
/// document in a lineage that has not rebound its content.
///
/// The slot is emptied when the owning document is disposed.
pub(crate) struct SharedContent {
    slot: Mutex<Slot>,
    release_pending: AtomicBool,
}

impl SharedContent {
    pub(crate) fn new(content: Content) -> Self {
        Self {
            slot: Mutex::new(Some(content.into_stream())),
            release_pending: AtomicBool::new(false),
        }
    }

    fn hold<'a>(&'a self, slot: MutexGuard<'a, Slot>) -> SlotGuard<'a> {
        let mut guard = SlotGuard { shared: self, slot };
        guard.settle();
        guard
    }

    /// Block until the stream is free.
    pub(crate) fn lock(&self) -> SlotGuard<'_> {
        self.hold(self.slot.lock())
    }

    /// Wait at most `timeout` for the stream.
    pub(crate) fn try_lock_for(&self, timeout: Duration) -> Option<SlotGuard<'_>> {
        self.slot.try_lock_for(timeout).map(|slot| self.hold(slot))
    }

    /// Drop the stream without waiting for the lock.
    ///
    /// While the stream is held, even by the calling thread, the release is
    /// recorded and carried out when the holder unlocks.
    pub(crate) fn release(&self) -> Release {
        self.release_pending.store(true, Ordering::Release);
        match self.slot.try_lock() {
            Some(slot) => {
                let mut guard = SlotGuard { shared: self, slot };
                let present = guard.slot.is_some();
                guard.settle();
                if present {
                    Release::Released
                } else {
                    Release::AlreadyReleased
                }
            }
            None => Release::Deferred,
        }
    }
}

/// A locked content slot. Carries out a pending release on acquisition and
/// before unlocking.
pub(crate) struct SlotGuard<'a> {
    shared: &'a SharedContent,
    slot: MutexGuard<'a, Slot>,
}

impl SlotGuard<'_> {
    fn settle(&mut self) {
        if self.shared.release_pending.swap(false, Ordering::AcqRel) {
            self.slot.take();
        }
    }
}

impl Deref for SlotGuard<'_> {
    type Target = Slot;

    fn deref(&self) -> &Slot {
        &self.slot
    }
}

impl DerefMut for SlotGuard<'_> {
    fn deref_mut(&mut self) -> &mut Slot {
        &mut self.slot
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.settle();
    }
}

impl fmt::Debug for SharedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.slot.try_lock() {
            Some(slot) if slot.is_some() => "available",
            Some(_) => "released",
            None => "in use",
        };
        f.debug_struct("SharedContent").field("state", &state).finish()
    }
}

/// Exclusive access to a document's content stream.
///
/// The stream is positioned at the start when the guard is handed out.
/// Other documents sharing the stream block until the guard is dropped or
/// [`release`](Self::release)d.
pub struct ContentGuard<'a> {
    slot: SlotGuard<'a>,
}

impl<'a> ContentGuard<'a> {
    /// Wrap a locked slot, rewinding the stream. The slot must hold a stream.
    pub(crate) fn new(mut slot: SlotGuard<'a>) -> io::Result<Self> {
        if let Some(stream) = slot.as_mut() {
            stream.seek(SeekFrom::Start(0))?;
        }
        Ok(Self { slot })
    }

    /// Give up access explicitly.
    pub fn release(self) {}

    /// Read the remaining content into a byte vector.
    ///
    /// # Errors
    ///
    /// Propagates stream read failures.
    pub fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn stream(&mut self) -> io::Result<&mut Box<dyn ContentStream>> {
        self.slot
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "content stream has been released"))
    }
}

impl Read for ContentGuard<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream()?.read(buf)
    }
}

impl Write for ContentGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream()?.flush()
    }
}

impl Seek for ContentGuard<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.stream()?.seek(pos)
    }
}

impl fmt::Debug for ContentGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContentGuard(..)")
    }
}
