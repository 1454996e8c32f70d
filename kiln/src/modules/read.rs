//! Reading input files into documents.

use log::{debug, trace};
use rayon::prelude::*;

use crate::document::{Document, DocumentUpdate};
use crate::engine::Engine;
use crate::error::Result;
use crate::io::ProviderFile;
use crate::metadata::{keys, Value};

/// Read every input file matching `patterns` into a document.
///
/// Patterns are evaluated against the virtual input directory; see
/// [`FileSystem::get_input_files`](crate::io::FileSystem::get_input_files).
/// Files are read in parallel and the documents come back in match order.
/// Each document carries the source metadata from [`keys`].
///
/// # Errors
///
/// Fails on a malformed pattern or when any file cannot be read.
///
/// # Examples
///
/// ```no_run
/// use kiln::config::ConfigBuilder;
/// use kiln::{modules, Engine};
/// use std::path::Path;
///
/// let config = ConfigBuilder::new().build().unwrap();
/// let engine = Engine::from_config(&config, Path::new("/srv/site")).unwrap();
/// let docs = modules::read_files(&engine, &["**/*.md"]).unwrap();
/// for doc in &docs {
///     println!("{doc}");
/// }
/// ```
pub fn read_files<S: AsRef<str>>(engine: &Engine, patterns: &[S]) -> Result<Vec<Document>> {
    let files = engine.file_system().get_input_files(patterns)?;
    debug!("Reading {} input file(s)", files.len());

    files
        .par_iter()
        .map(|file| read_file(engine, file))
        .collect()
}

/// Read one file into a document with source metadata.
///
/// The source must be absolute. The relative path is taken against the
/// input path containing the file, or is just the file name when no input
/// path contains it.
///
/// # Errors
///
/// Fails when the file cannot be read or its path is relative.
pub fn read_file(engine: &Engine, file: &ProviderFile) -> Result<Document> {
    let source = file.path();
    let root = engine.file_system().get_containing_input_path(source)?;
    let relative = match &root {
        Some(root) => root.relative_file(source)?,
        None => source.file_name_path(),
    };
    trace!("Reading {source} as {relative}");

    let mut items: Vec<(&str, Value)> = vec![
        (keys::SOURCE_FILE_PATH, source.clone().into()),
        (keys::SOURCE_FILE_NAME, source.file_name().into()),
        (keys::SOURCE_FILE_BASE, source.file_name_without_extension().into()),
        (keys::SOURCE_FILE_DIR, source.directory().into()),
        (keys::RELATIVE_FILE_PATH, relative.clone().into()),
        (keys::RELATIVE_FILE_DIR, relative.directory().into()),
    ];
    if let Some(root) = root {
        items.push((keys::SOURCE_FILE_ROOT, root.into()));
    }
    if let Some(ext) = source.extension() {
        items.push((keys::SOURCE_FILE_EXT, ext.into()));
    }

    let content = file.read_bytes()?;
    engine.documents().get_document_from(
        None,
        DocumentUpdate::new()
            .with_source(source.clone())
            .with_content(content)
            .with_items(items),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentFactory;
    use crate::io::{FileSystem, InMemoryFileProvider};
    use crate::metadata::MetadataStack;
    use crate::path::{DirectoryPath, FilePath};
    use std::sync::Arc;

    fn engine() -> Engine {
        let memory = InMemoryFileProvider::new()
            .with_file("/site/input/posts/a.md", "# A")
            .unwrap()
            .with_file("/site/input/posts/b.txt", "B")
            .unwrap()
            .with_file("/site/theme/layout.html", "<html>")
            .unwrap();
        let mut fs = FileSystem::new(DirectoryPath::new("/site").unwrap()).unwrap();
        fs.register_provider("", Arc::new(memory));
        fs.add_input_path(DirectoryPath::new("theme").unwrap());
        Engine::new(
            fs,
            DocumentFactory::new(MetadataStack::from_items([("Site", "Test")])),
        )
    }

    #[test]
    fn test_read_files_source_metadata() {
        let engine = engine();
        let docs = read_files(&engine, &["posts/*.md"]).unwrap();
        assert_eq!(docs.len(), 1);

        let doc = &docs[0];
        let meta = doc.metadata();
        assert_eq!(doc.source().unwrap().to_string(), "/site/input/posts/a.md");
        assert_eq!(meta.get_string(keys::SOURCE_FILE_NAME).unwrap(), "a.md");
        assert_eq!(meta.get_string(keys::SOURCE_FILE_BASE).unwrap(), "a");
        assert_eq!(meta.get_string(keys::SOURCE_FILE_EXT).unwrap(), "md");
        assert_eq!(meta.get_string(keys::SOURCE_FILE_DIR).unwrap(), "/site/input/posts");
        assert_eq!(meta.get_string(keys::SOURCE_FILE_ROOT).unwrap(), "/site/input");
        assert_eq!(
            meta.get_file_path(keys::RELATIVE_FILE_PATH).unwrap(),
            FilePath::new("posts/a.md").unwrap()
        );
        assert_eq!(meta.get_string(keys::RELATIVE_FILE_DIR).unwrap(), "posts");
        assert_eq!(meta.get_string("Site").unwrap(), "Test");
        assert_eq!(doc.content_string().unwrap(), "# A");
    }

    #[test]
    fn test_read_files_spans_input_paths_in_order() {
        let engine = engine();
        let docs = read_files(&engine, &["**/*"]).unwrap();
        let names: Vec<String> = docs
            .iter()
            .map(|d| d.metadata().get_string(keys::RELATIVE_FILE_PATH).unwrap())
            .collect();
        assert_eq!(names, vec!["posts/a.md", "posts/b.txt", "layout.html"]);
    }

    #[test]
    fn test_read_files_identities_distinct() {
        let engine = engine();
        let docs = read_files(&engine, &["**/*"]).unwrap();
        assert_ne!(docs[0].id(), docs[1].id());
    }

    #[test]
    fn test_read_file_outside_inputs_uses_file_name() {
        let engine = engine();
        let file = engine
            .file_system()
            .get_file(&FilePath::new("/site/input/posts/b.txt").unwrap())
            .unwrap();
        let mut fs_without_inputs = FileSystem::new(DirectoryPath::new("/site").unwrap()).unwrap();
        fs_without_inputs.set_input_paths(vec![DirectoryPath::new("elsewhere").unwrap()]);
        fs_without_inputs.register_provider("", Arc::clone(file.provider()));
        let engine = Engine::new(fs_without_inputs, DocumentFactory::default());

        let doc = read_file(&engine, &file).unwrap();
        assert_eq!(doc.metadata().get_string(keys::RELATIVE_FILE_PATH).unwrap(), "b.txt");
        assert!(!doc.metadata().contains_key(keys::SOURCE_FILE_ROOT));
    }
}
