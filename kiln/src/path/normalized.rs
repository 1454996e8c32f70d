//! The shared representation behind [`FilePath`](super::FilePath) and
//! [`DirectoryPath`](super::DirectoryPath).
//!
//! A normalized path is a provider scheme, an absolute flag, and a sequence of
//! segments. Paths are always collapsed: `.` never survives parsing and `..`
//! is folded into the preceding segment wherever one exists.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Separator between a provider scheme and the rest of a path (`alt::/foo`).
pub const SCHEME_SEPARATOR: &str = "::";

const CURRENT: &str = ".";
const PARENT: &str = "..";

/// A scheme-qualified, collapsed sequence of path segments.
///
/// Equality, ordering and hashing are structural and case-sensitive, so
/// normalized paths can be used as map keys for provider routing and
/// metadata lookups.
///
/// # Examples
///
/// ```
/// use kiln::path::NormalizedPath;
///
/// let path = NormalizedPath::parse("alt::/a/./b/../c").unwrap();
/// assert_eq!(path.scheme(), "alt");
/// assert!(path.is_absolute());
/// assert_eq!(path.segments(), ["a", "c"]);
/// assert_eq!(path.to_string(), "alt::/a/c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    scheme: String,
    absolute: bool,
    segments: Vec<String>,
}

impl NormalizedPath {
    /// Parse a raw path string.
    ///
    /// Backslashes are treated as separators and an optional `scheme::`
    /// prefix selects the provider. A leading `/` or a drive letter (`C:`)
    /// marks the path as absolute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArgument`] for an empty string and
    /// [`Error::InvalidPath`] when `..` would climb above an absolute root.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(Error::missing("path"));
        }

        let (scheme, rest) = split_scheme(raw);
        let rest = rest.replace('\\', "/");
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        let absolute = rest.starts_with('/') || segments.first().is_some_and(|s| is_drive(s));

        Self::from_parts(scheme, absolute, segments).map_err(|e| match e {
            Error::InvalidPath { reason, .. } => Error::invalid_path(raw, reason),
            other => other,
        })
    }

    /// Build a path from already split segments, collapsing `.` and `..`.
    ///
    /// # Errors
    ///
    /// Returns an error if the segments climb above an absolute root.
    pub fn from_parts<I, S>(scheme: &str, absolute: bool, segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = collapse(absolute, segments)?;
        Ok(Self {
            scheme: scheme.to_string(),
            absolute,
            segments,
        })
    }

    /// A path with no segments: `/` when absolute, `.` otherwise.
    pub(crate) fn empty(absolute: bool) -> Self {
        Self {
            scheme: String::new(),
            absolute,
            segments: Vec::new(),
        }
    }

    /// A relative path of exactly one segment.
    pub(crate) fn single(segment: &str) -> Self {
        Self {
            scheme: String::new(),
            absolute: false,
            segments: vec![segment.to_string()],
        }
    }

    /// The provider scheme (empty for the default provider).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Whether the path starts at a root.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Whether the path is relative.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        !self.absolute
    }

    /// The collapsed segments of this path.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The path text without its scheme prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use kiln::path::NormalizedPath;
    ///
    /// assert_eq!(NormalizedPath::parse("alt::/a/b").unwrap().full_path(), "/a/b");
    /// assert_eq!(NormalizedPath::parse("a/../..").unwrap().full_path(), "..");
    /// assert_eq!(NormalizedPath::parse("a/..").unwrap().full_path(), ".");
    /// ```
    #[must_use]
    pub fn full_path(&self) -> String {
        let joined = self.segments.join("/");
        if !self.absolute {
            return if joined.is_empty() {
                CURRENT.to_string()
            } else {
                joined
            };
        }
        match self.segments.first() {
            Some(first) if is_drive(first) => {
                if self.segments.len() == 1 {
                    format!("{joined}/")
                } else {
                    joined
                }
            }
            _ => format!("/{joined}"),
        }
    }

    /// The same path under another provider scheme.
    #[must_use]
    pub fn with_scheme(&self, scheme: &str) -> Self {
        Self {
            scheme: scheme.to_string(),
            ..self.clone()
        }
    }

    /// Append `other` to this path.
    ///
    /// An absolute `other` is returned unchanged. Otherwise the result keeps
    /// this path's absoluteness and scheme, unless `other` names its own
    /// scheme, and is collapsed.
    ///
    /// # Errors
    ///
    /// Returns an error if the combination climbs above an absolute root.
    ///
    /// # Examples
    ///
    /// ```
    /// use kiln::path::NormalizedPath;
    ///
    /// let base = NormalizedPath::parse("/a/b").unwrap();
    /// let rel = NormalizedPath::parse("../c").unwrap();
    /// assert_eq!(base.combine(&rel).unwrap().to_string(), "/a/c");
    /// ```
    pub fn combine(&self, other: &NormalizedPath) -> Result<Self> {
        if other.absolute {
            return Ok(other.clone());
        }
        let scheme = if other.scheme.is_empty() {
            &self.scheme
        } else {
            &other.scheme
        };
        Self::from_parts(
            scheme,
            self.absolute,
            self.segments.iter().chain(other.segments.iter()),
        )
        .map_err(|_| {
            Error::invalid_path(
                format!("{self} + {other}"),
                "combined path climbs above the root",
            )
        })
    }

    /// The segments of the parent of this path, if there is one.
    pub(crate) fn parent_parts(&self) -> Option<Self> {
        if self.segments.is_empty() || self.segments.last().is_some_and(|s| s == PARENT) {
            return None;
        }
        if self.absolute && self.segments.len() == 1 && is_drive(&self.segments[0]) {
            return None;
        }
        let mut parent = self.clone();
        parent.segments.pop();
        Some(parent)
    }

    /// Replace the last segment.
    pub(crate) fn with_last_segment(&self, name: &str) -> Self {
        let mut renamed = self.clone();
        if let Some(last) = renamed.segments.last_mut() {
            *last = name.to_string();
        }
        renamed
    }

    /// Whether `other` lies at or beneath this path.
    ///
    /// Both paths must share the same scheme and absoluteness.
    #[must_use]
    pub fn contains(&self, other: &NormalizedPath) -> bool {
        self.scheme == other.scheme
            && self.absolute == other.absolute
            && other.segments.len() >= self.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(a, b)| a == b)
    }

    /// The shortest relative path leading from this path to `target`.
    ///
    /// # Errors
    ///
    /// Fails when the two paths have different schemes, when one is absolute
    /// and the other is not, or when this path begins with unresolved `..`
    /// segments that cannot be walked back.
    ///
    /// # Examples
    ///
    /// ```
    /// use kiln::path::NormalizedPath;
    ///
    /// let from = NormalizedPath::parse("/a/b/c").unwrap();
    /// let to = NormalizedPath::parse("/a/d/e.txt").unwrap();
    /// assert_eq!(from.relative_path(&to).unwrap().to_string(), "../../d/e.txt");
    /// ```
    pub fn relative_path(&self, target: &NormalizedPath) -> Result<Self> {
        if self.scheme != target.scheme {
            return Err(Error::invalid_path(
                target,
                format!(
                    "cannot compute a relative path across schemes '{}' and '{}'",
                    self.scheme, target.scheme
                ),
            ));
        }
        if self.absolute != target.absolute {
            return Err(Error::invalid_path(
                target,
                format!("cannot relate '{self}' and '{target}' (mixed absolute and relative)"),
            ));
        }

        let common = self
            .segments
            .iter()
            .zip(target.segments.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let remaining = &self.segments[common..];
        if remaining.iter().any(|s| s == PARENT) {
            return Err(Error::invalid_path(
                self,
                "cannot walk back through unresolved '..' segments",
            ));
        }

        let segments = remaining
            .iter()
            .map(|_| PARENT)
            .chain(target.segments[common..].iter().map(String::as_str));
        Self::from_parts("", false, segments)
    }

    /// Convert to a platform path (the scheme is dropped).
    #[must_use]
    pub fn to_std_path(&self) -> PathBuf {
        PathBuf::from(self.full_path())
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.scheme.is_empty() {
            write!(f, "{}{SCHEME_SEPARATOR}", self.scheme)?;
        }
        f.write_str(&self.full_path())
    }
}

/// Split a leading `scheme::` prefix off `raw`. Returns an empty scheme when
/// there is none.
pub(crate) fn split_scheme(raw: &str) -> (&str, &str) {
    if let Some(idx) = raw.find(SCHEME_SEPARATOR) {
        let scheme = &raw[..idx];
        if !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return (scheme, &raw[idx + SCHEME_SEPARATOR.len()..]);
        }
    }
    ("", raw)
}

/// Whether `segment` is a Windows drive letter such as `C:`.
pub(crate) fn is_drive(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Fold `.` and `..` segments left to right.
fn collapse<I, S>(absolute: bool, segments: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for segment in segments {
        let segment = segment.as_ref();
        match segment {
            "" | CURRENT => {}
            PARENT => {
                let floor = usize::from(absolute && out.first().is_some_and(|s| is_drive(s)));
                if out.len() > floor && out.last().is_some_and(|s| s != PARENT) {
                    out.pop();
                } else if absolute {
                    return Err(Error::invalid_path(
                        out.join("/"),
                        "path contains too many '..' segments (escapes root)",
                    ));
                } else {
                    out.push(PARENT.to_string());
                }
            }
            other => out.push(other.to_string()),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute() {
        let path = NormalizedPath::parse("/a/b/c").unwrap();
        assert!(path.is_absolute());
        assert_eq!(path.scheme(), "");
        assert_eq!(path.segments(), ["a", "b", "c"]);
        assert_eq!(path.to_string(), "/a/b/c");
    }

    #[test]
    fn test_parse_relative_collapses() {
        let path = NormalizedPath::parse("./a/./b/../c/").unwrap();
        assert!(path.is_relative());
        assert_eq!(path.to_string(), "a/c");
    }

    #[test]
    fn test_parse_keeps_leading_parent_for_relative() {
        let path = NormalizedPath::parse("../../a").unwrap();
        assert_eq!(path.segments(), ["..", "..", "a"]);
        assert_eq!(path.to_string(), "../../a");
    }

    #[test]
    fn test_parse_rejects_escape_above_root() {
        let err = NormalizedPath::parse("/a/../..").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
        assert!(err.to_string().contains("/a/../.."));
    }

    #[test]
    fn test_parse_empty_is_missing_argument() {
        assert!(matches!(
            NormalizedPath::parse("").unwrap_err(),
            Error::MissingArgument { .. }
        ));
        assert!(matches!(
            NormalizedPath::parse("   ").unwrap_err(),
            Error::MissingArgument { .. }
        ));
    }

    #[test]
    fn test_parse_scheme() {
        let path = NormalizedPath::parse("alt::/foo/bar").unwrap();
        assert_eq!(path.scheme(), "alt");
        assert_eq!(path.full_path(), "/foo/bar");
        assert_eq!(path.to_string(), "alt::/foo/bar");
    }

    #[test]
    fn test_parse_backslashes() {
        let path = NormalizedPath::parse("\\a\\b").unwrap();
        assert!(path.is_absolute());
        assert_eq!(path.to_string(), "/a/b");
    }

    #[test]
    fn test_parse_drive_letter() {
        let path = NormalizedPath::parse("C:\\temp\\..\\site").unwrap();
        assert!(path.is_absolute());
        assert_eq!(path.to_string(), "C:/site");
        assert!(NormalizedPath::parse("C:/..").is_err());
        assert_eq!(NormalizedPath::parse("C:/").unwrap().to_string(), "C:/");
    }

    #[test]
    fn test_root_and_current() {
        assert_eq!(NormalizedPath::parse("/").unwrap().to_string(), "/");
        assert_eq!(NormalizedPath::parse(".").unwrap().to_string(), ".");
        assert_eq!(NormalizedPath::parse("a/..").unwrap().to_string(), ".");
    }

    #[test]
    fn test_combine_inherits_scheme() {
        let base = NormalizedPath::parse("alt::/root").unwrap();
        let rel = NormalizedPath::parse("input/x").unwrap();
        assert_eq!(base.combine(&rel).unwrap().to_string(), "alt::/root/input/x");
    }

    #[test]
    fn test_combine_argument_scheme_wins() {
        let base = NormalizedPath::parse("/root").unwrap();
        let rel = NormalizedPath::parse("alt::theme").unwrap();
        assert_eq!(base.combine(&rel).unwrap().to_string(), "alt::/root/theme");
    }

    #[test]
    fn test_combine_absolute_argument() {
        let base = NormalizedPath::parse("/root").unwrap();
        let abs = NormalizedPath::parse("/other").unwrap();
        assert_eq!(base.combine(&abs).unwrap(), abs);
    }

    #[test]
    fn test_combine_escaping_root_fails() {
        let base = NormalizedPath::parse("/a").unwrap();
        let rel = NormalizedPath::parse("../../b").unwrap();
        assert!(base.combine(&rel).is_err());
    }

    #[test]
    fn test_relative_path() {
        let from = NormalizedPath::parse("/a/b").unwrap();
        let to = NormalizedPath::parse("/a/b/c/d.txt").unwrap();
        assert_eq!(from.relative_path(&to).unwrap().to_string(), "c/d.txt");

        let sibling = NormalizedPath::parse("/a/x").unwrap();
        assert_eq!(from.relative_path(&sibling).unwrap().to_string(), "../x");
        assert_eq!(from.relative_path(&from).unwrap().to_string(), ".");
    }

    #[test]
    fn test_relative_path_requires_same_scheme() {
        let from = NormalizedPath::parse("/a").unwrap();
        let to = NormalizedPath::parse("alt::/a/b").unwrap();
        assert!(from.relative_path(&to).is_err());
    }

    #[test]
    fn test_relative_path_requires_same_kind() {
        let from = NormalizedPath::parse("/a").unwrap();
        let to = NormalizedPath::parse("a/b").unwrap();
        assert!(from.relative_path(&to).is_err());
    }

    #[test]
    fn test_contains() {
        let dir = NormalizedPath::parse("/a/b").unwrap();
        assert!(dir.contains(&NormalizedPath::parse("/a/b/c").unwrap()));
        assert!(dir.contains(&dir));
        assert!(!dir.contains(&NormalizedPath::parse("/a/bc").unwrap()));
        assert!(!dir.contains(&NormalizedPath::parse("alt::/a/b/c").unwrap()));
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        let lower = NormalizedPath::parse("/a/b").unwrap();
        let upper = NormalizedPath::parse("/A/b").unwrap();
        assert_ne!(lower, upper);
    }
}
