//! Persisting documents to the output directory.

use std::io::{self, Write};

use log::{debug, warn};
use rayon::prelude::*;

use crate::document::{Document, DocumentUpdate};
use crate::engine::Engine;
use crate::error::Result;
use crate::metadata::{keys, Value};
use crate::path::FilePath;

/// Outcome of a write pass.
#[derive(Debug)]
pub struct WriteResult {
    /// Clones of the written documents, tagged with their destination.
    pub written: Vec<Document>,
    /// Documents skipped because no destination could be derived.
    pub skipped: usize,
    /// Total bytes written.
    pub bytes: u64,
}

/// Where a document would be written, relative to the output directory
/// unless [`keys::WRITE_PATH`] names an absolute location.
///
/// In order:
/// 1. [`keys::WRITE_PATH`] wins outright.
/// 2. Otherwise start from [`keys::RELATIVE_FILE_PATH`], falling back to the
///    source file name.
/// 3. [`keys::WRITE_FILE_NAME`] replaces the file name.
/// 4. [`keys::WRITE_EXTENSION`] replaces the extension.
///
/// A file name or extension that is not a single path segment is ignored.
///
/// Returns `None` for a document with none of these.
///
/// # Examples
///
/// ```
/// use kiln::document::{DocumentFactory, DocumentUpdate};
/// use kiln::metadata::keys;
/// use kiln::modules::destination;
///
/// let doc = DocumentFactory::default()
///     .get_document_from(
///         None,
///         DocumentUpdate::new().with_items([
///             (keys::RELATIVE_FILE_PATH, "posts/a.md"),
///             (keys::WRITE_EXTENSION, "html"),
///         ]),
///     )
///     .unwrap();
/// assert_eq!(destination(&doc).unwrap().to_string(), "posts/a.html");
/// ```
#[must_use]
pub fn destination(document: &Document) -> Option<FilePath> {
    let metadata = document.metadata();
    if let Some(path) = metadata.get_file_path(keys::WRITE_PATH) {
        return Some(path);
    }

    let mut path = metadata
        .get_file_path(keys::RELATIVE_FILE_PATH)
        .or_else(|| document.source().map(FilePath::file_name_path))?;

    if let Some(name) = metadata.get_string(keys::WRITE_FILE_NAME) {
        match path.change_file_name(&name) {
            Ok(renamed) => path = renamed,
            Err(e) => warn!("Ignoring {} for {document}: {e}", keys::WRITE_FILE_NAME),
        }
    }
    if let Some(extension) = metadata.get_string(keys::WRITE_EXTENSION) {
        match path.change_extension(&extension) {
            Ok(changed) => path = changed,
            Err(e) => warn!("Ignoring {} for {document}: {e}", keys::WRITE_EXTENSION),
        }
    }
    Some(path)
}

/// Write each document's content to its [`destination`] under the output
/// directory.
///
/// Documents are written in parallel. Every written document is returned as
/// a clone carrying [`keys::DESTINATION_FILE_PATH`],
/// [`keys::DESTINATION_FILE_NAME`] and [`keys::DESTINATION_FILE_DIR`]; the
/// clone takes over the content stream. Documents without a destination are
/// skipped with a warning.
///
/// # Errors
///
/// Fails when a destination climbs out of the output directory, a document
/// has been disposed, or a write fails.
pub fn write_files(engine: &Engine, documents: &[Document]) -> Result<WriteResult> {
    let outcomes = documents
        .par_iter()
        .map(|document| write_document(engine, document))
        .collect::<Result<Vec<_>>>()?;

    let mut result = WriteResult {
        written: Vec::with_capacity(outcomes.len()),
        skipped: 0,
        bytes: 0,
    };
    for outcome in outcomes {
        match outcome {
            Some((document, bytes)) => {
                result.written.push(document);
                result.bytes += bytes;
            }
            None => result.skipped += 1,
        }
    }
    debug!(
        "Wrote {} document(s), {} byte(s); skipped {}",
        result.written.len(),
        result.bytes,
        result.skipped
    );
    Ok(result)
}

fn write_document(engine: &Engine, document: &Document) -> Result<Option<(Document, u64)>> {
    let Some(relative) = destination(document) else {
        warn!("No destination for document {document}, skipping");
        return Ok(None);
    };

    let file = engine.file_system().get_output_file(&relative)?;
    let bytes = {
        let mut stream = document.stream()?;
        let mut writer = file.open_write()?;
        let bytes = io::copy(&mut stream, &mut writer)?;
        writer.flush()?;
        bytes
    };
    debug!("Wrote {document} to {}", file.path());

    let target = file.path();
    let written = engine.documents().get_document_from(
        Some(document),
        DocumentUpdate::new().with_items([
            (keys::DESTINATION_FILE_PATH, Value::from(target.clone())),
            (keys::DESTINATION_FILE_NAME, Value::from(target.file_name())),
            (keys::DESTINATION_FILE_DIR, Value::from(target.directory())),
        ]),
    )?;
    Ok(Some((written, bytes)))
}
