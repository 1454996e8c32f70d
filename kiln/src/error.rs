//! Error types for the kiln library.
//!
//! This module provides the error hierarchy shared by the path, file system,
//! metadata and document layers, using `thiserror` for ergonomic error
//! handling.
//!
//! Errors fall into a few broad families:
//!
//! - **Contract violations**: a missing argument, a relative path where an
//!   absolute one is required, a malformed glob. These are caller bugs.
//! - **Configuration errors**: most notably a path whose scheme has no
//!   registered provider.
//! - **Disposed-resource access**: reading the content of a document after it
//!   was disposed, or disposing it twice.

use thiserror::Error;

/// Result type alias for operations that may fail with a kiln error.
///
/// # Examples
///
/// ```
/// use kiln::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the kiln library.
#[derive(Debug, Error)]
pub enum Error {
    /// A path string could not be parsed, or a path of the wrong kind was
    /// supplied (for example a relative path where an absolute one is
    /// required).
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path, as text.
        path: String,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A required argument was absent or empty.
    #[error("missing argument: {name}")]
    MissingArgument {
        /// The name of the missing argument.
        name: String,
    },

    /// No file provider is registered for the scheme of a path.
    #[error("no file provider registered for scheme '{scheme}' (path '{path}')")]
    ProviderNotFound {
        /// The unregistered scheme (empty for the default scheme).
        scheme: String,
        /// The path whose provider was requested.
        path: String,
    },

    /// A glob pattern could not be compiled.
    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidGlobPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The reason reported by the glob compiler.
        reason: String,
    },

    /// A document was used after it was disposed.
    #[error("document {id} (source: {}) has already been disposed", source_label(.source_path))]
    DocumentDisposed {
        /// The document identity.
        id: String,
        /// The document source, if any.
        source_path: Option<String>,
    },

    /// The content stream shared by a document lineage has been released.
    #[error("content stream of document {id} (source: {}) has been released", source_label(.source_path))]
    StreamReleased {
        /// The document identity.
        id: String,
        /// The document source, if any.
        source_path: Option<String>,
    },

    /// Timed out waiting for another holder to release a content stream.
    #[error("timed out after {millis}ms waiting for the content stream of document {id}")]
    StreamTimeout {
        /// The document identity.
        id: String,
        /// How long the caller waited.
        millis: u128,
    },

    /// A metadata key was not present.
    #[error("metadata key not found: {key}")]
    KeyNotFound {
        /// The key that was looked up.
        key: String,
    },

    /// A metadata value could not be converted to the requested type.
    #[error("metadata value for '{key}' cannot be converted to {target}")]
    Conversion {
        /// The key that was looked up.
        key: String,
        /// The requested target type.
        target: &'static str,
    },

    /// A file that was required to exist does not.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The missing file.
        path: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn source_label(source_path: &Option<String>) -> &str {
    source_path.as_deref().unwrap_or("<none>")
}

impl Error {
    /// Build an [`Error::InvalidPath`] from anything displayable.
    pub(crate) fn invalid_path(path: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Build an [`Error::MissingArgument`].
    pub(crate) fn missing(name: impl Into<String>) -> Self {
        Self::MissingArgument { name: name.into() }
    }

    /// Check if error indicates that something could not be found.
    ///
    /// # Examples
    ///
    /// ```
    /// use kiln::Error;
    ///
    /// let err = Error::ProviderNotFound { scheme: "alt".into(), path: "alt::/a".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProviderNotFound { .. } | Self::KeyNotFound { .. } | Self::FileNotFound { .. }
        )
    }

    /// Check if error is a caller contract violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use kiln::Error;
    ///
    /// let err = Error::MissingArgument { name: "patterns".into() };
    /// assert!(err.is_contract_violation());
    /// ```
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. } | Self::MissingArgument { .. } | Self::InvalidGlobPattern { .. }
        )
    }

    /// Check if error reports use of a disposed document or released stream.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        matches!(self, Self::DocumentDisposed { .. } | Self::StreamReleased { .. })
    }
}
