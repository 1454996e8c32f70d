//! Normalized, provider-qualified paths.
//!
//! Every location kiln deals with, whether on disk, in memory, or behind some
//! other provider, is expressed as a [`NormalizedPath`], usually through one
//! of its two typed wrappers:
//!
//! - [`FilePath`]: a path ending in a file name.
//! - [`DirectoryPath`]: a path naming a directory.
//!
//! # Key Concepts
//!
//! ## Normalization
//!
//! Paths are collapsed eagerly when they are built:
//! - Backslashes become forward slashes
//! - `.` segments are dropped
//! - `..` segments fold into their predecessor, and walking above an absolute
//!   root is an error
//!
//! Normalization is idempotent: re-parsing the display form of a path yields
//! an equal path.
//!
//! ## Schemes
//!
//! A path may be prefixed with a provider scheme, as in `alt::/assets`. The
//! scheme selects which [`FileProvider`](crate::io::FileProvider) owns the
//! location; the empty scheme is the default provider. Paths under different
//! schemes never contain one another.
//!
//! # Examples
//!
//! ```
//! use kiln::path::{DirectoryPath, FilePath, PathRelationship};
//!
//! let root = DirectoryPath::new("/site").unwrap();
//! let file = root.combine_file(&FilePath::new("input/./posts/../about.md").unwrap()).unwrap();
//! assert_eq!(file.to_string(), "/site/input/about.md");
//!
//! let rel = PathRelationship::between(&root, &file);
//! assert_eq!(rel, PathRelationship::Ancestor);
//! assert_eq!(root.relative_file(&file).unwrap().to_string(), "input/about.md");
//! ```

mod directory_path;
mod file_path;
pub mod normalize;
mod normalized;
pub mod relationship;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use directory_path::DirectoryPath;
pub use file_path::FilePath;
pub use normalized::{NormalizedPath, SCHEME_SEPARATOR};
pub(crate) use normalized::{is_drive, split_scheme};
pub use relationship::PathRelationship;
