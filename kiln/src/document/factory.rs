//! Creating and cloning documents.

use std::sync::Arc;

use log::trace;
use uuid::Uuid;

use crate::document::content::{Content, SharedContent};
use crate::document::entity::Document;
use crate::error::Result;
use crate::metadata::{MetadataStack, MetadataValue};
use crate::path::FilePath;

/// Changes applied when deriving a document.
///
/// # Examples
///
/// ```
/// use kiln::document::DocumentUpdate;
/// use kiln::path::FilePath;
///
/// let update = DocumentUpdate::new()
///     .with_source(FilePath::new("/site/input/a.md").unwrap())
///     .with_content("body")
///     .with_items([("Title", "A")]);
/// ```
#[derive(Debug)]
pub struct DocumentUpdate {
    source: Option<FilePath>,
    content: Option<Content>,
    items: Option<Vec<(String, MetadataValue)>>,
    dispose_content: bool,
}

impl Default for DocumentUpdate {
    fn default() -> Self {
        Self {
            source: None,
            content: None,
            items: None,
            dispose_content: true,
        }
    }
}

impl DocumentUpdate {
    /// An update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source, unless the lineage already has one.
    #[must_use]
    pub fn with_source(mut self, source: FilePath) -> Self {
        self.source = Some(source);
        self
    }

    /// Bind new content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<Content>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Push one metadata layer holding `items`.
    #[must_use]
    pub fn with_items<I, K, V>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        self.items = Some(
            items
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Keep the new content alive when the document is disposed; the caller
    /// stays responsible for it.
    #[must_use]
    pub fn retain_content(mut self) -> Self {
        self.dispose_content = false;
        self
    }
}

/// Creates root documents and derives clones.
///
/// Every document starts from the factory's settings stack.
#[derive(Debug, Clone, Default)]
pub struct DocumentFactory {
    settings: MetadataStack,
}

impl DocumentFactory {
    /// A factory whose documents start from `settings`.
    #[must_use]
    pub fn new(settings: MetadataStack) -> Self {
        Self { settings }
    }

    /// The settings stack.
    #[must_use]
    pub fn settings(&self) -> &MetadataStack {
        &self.settings
    }

    /// A root document: new identity, no source, settings-only metadata and
    /// empty content.
    #[must_use]
    pub fn get_document(&self) -> Document {
        Document::new(
            Uuid::new_v4(),
            None,
            self.settings.clone(),
            Arc::new(SharedContent::new(Content::empty())),
            true,
        )
    }

    /// Derive a document from `source`, or create a root document seeded
    /// with `update` when `source` is `None`.
    ///
    /// A clone keeps the identity and metadata of its parent. New items push
    /// one layer. A new source applies only if the lineage has none. New
    /// content is bound to this clone alone; without it, the clone shares the
    /// parent's stream and takes over responsibility for releasing it.
    ///
    /// # Errors
    ///
    /// Fails if the new source is not absolute, or when sharing the stream
    /// of a disposed document.
    pub fn get_document_from(
        &self,
        source: Option<&Document>,
        update: DocumentUpdate,
    ) -> Result<Document> {
        if let Some(path) = &update.source {
            path.require_absolute()?;
        }

        let DocumentUpdate {
            source: new_source,
            content,
            items,
            dispose_content,
        } = update;

        let Some(parent) = source else {
            let metadata = match items {
                Some(items) => self.settings.clone_with(items),
                None => self.settings.clone(),
            };
            let (content, owns) = match content {
                Some(content) => (content, dispose_content),
                None => (Content::empty(), true),
            };
            return Ok(Document::new(
                Uuid::new_v4(),
                new_source,
                metadata,
                Arc::new(SharedContent::new(content)),
                owns,
            ));
        };

        let source_path = match (parent.source(), new_source) {
            (Some(existing), Some(ignored)) => {
                trace!("Document {} keeps source {existing}, ignoring {ignored}", parent.id());
                Some(existing.clone())
            }
            (existing, new) => existing.cloned().or(new),
        };

        let metadata = match items {
            Some(items) => parent.metadata().clone_with(items),
            None => parent.metadata().clone(),
        };

        let (shared, owns) = match content {
            Some(content) => (Arc::new(SharedContent::new(content)), dispose_content),
            None => {
                if parent.is_disposed() {
                    return Err(parent.disposed_error());
                }
                (
                    Arc::clone(parent.shared_content()),
                    parent.transfer_ownership(),
                )
            }
        };

        Ok(Document::new(parent.id(), source_path, metadata, shared, owns))
    }
}
