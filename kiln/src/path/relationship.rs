//! Path relationship checking.
//!
//! This module provides functionality to determine the relationship between
//! two normalized paths, such as whether one is an ancestor or descendant of
//! the other. Paths under different schemes live in different address spaces
//! and are always unrelated.

use crate::path::NormalizedPath;

/// Relationship between two paths.
///
/// # Examples
///
/// ```
/// use kiln::path::{NormalizedPath, PathRelationship};
///
/// let parent = NormalizedPath::parse("/site/input").unwrap();
/// let child = NormalizedPath::parse("/site/input/posts/a.md").unwrap();
///
/// assert_eq!(
///     PathRelationship::between(&parent, &child),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,

    /// The first path is a descendant of the second.
    Descendant,

    /// The paths are the same.
    Same,

    /// The paths are unrelated.
    ///
    /// Neither path is an ancestor or descendant of the other: they are in
    /// different branches, under different schemes, or one is relative while
    /// the other is absolute.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use kiln::path::{NormalizedPath, PathRelationship};
    ///
    /// let a = NormalizedPath::parse("/a").unwrap();
    /// let ab = NormalizedPath::parse("/a/b").unwrap();
    /// let b = NormalizedPath::parse("/b").unwrap();
    /// let alt_a = NormalizedPath::parse("alt::/a/b").unwrap();
    ///
    /// assert_eq!(PathRelationship::between(&a, &ab), PathRelationship::Ancestor);
    /// assert_eq!(PathRelationship::between(&ab, &a), PathRelationship::Descendant);
    /// assert_eq!(PathRelationship::between(&a, &a), PathRelationship::Same);
    /// assert_eq!(PathRelationship::between(&a, &b), PathRelationship::Unrelated);
    /// assert_eq!(PathRelationship::between(&a, &alt_a), PathRelationship::Unrelated);
    /// ```
    #[must_use]
    pub fn between(path1: &NormalizedPath, path2: &NormalizedPath) -> Self {
        if path1 == path2 {
            return Self::Same;
        }

        if path1.contains(path2) {
            return Self::Ancestor;
        }

        if path2.contains(path1) {
            return Self::Descendant;
        }

        Self::Unrelated
    }

    /// Check if the relationship is hierarchical (not unrelated).
    ///
    /// # Examples
    ///
    /// ```
    /// use kiln::path::PathRelationship;
    ///
    /// assert!(PathRelationship::Ancestor.is_hierarchical());
    /// assert!(PathRelationship::Descendant.is_hierarchical());
    /// assert!(PathRelationship::Same.is_hierarchical());
    /// assert!(!PathRelationship::Unrelated.is_hierarchical());
    /// ```
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        matches!(self, Self::Ancestor | Self::Descendant | Self::Same)
    }

    /// Check if `path` lies within `dir` (descendant or same).
    ///
    /// # Examples
    ///
    /// ```
    /// use kiln::path::{NormalizedPath, PathRelationship};
    ///
    /// let dir = NormalizedPath::parse("/site/input").unwrap();
    /// let inside = NormalizedPath::parse("/site/input/a.md").unwrap();
    /// let outside = NormalizedPath::parse("/site/output/a.html").unwrap();
    ///
    /// assert!(PathRelationship::is_within(&inside, &dir));
    /// assert!(!PathRelationship::is_within(&outside, &dir));
    /// ```
    #[must_use]
    pub fn is_within(path: &NormalizedPath, dir: &NormalizedPath) -> bool {
        matches!(Self::between(dir, path), Self::Ancestor | Self::Same)
    }
}
