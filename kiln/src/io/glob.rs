//! Glob pattern evaluation against directories.
//!
//! Patterns use the familiar wildcard syntax: `*` and `?` within a segment,
//! `**` across segments, `[...]` classes and `{a,b}` alternation. A pattern
//! starting with `!` excludes what it matches from the files gathered so far,
//! and from anything later patterns would add. Patterns are evaluated in
//! order.
//!
//! Each pattern is split into a literal base directory and a wildcard
//! remainder. Relative bases resolve against the directory being searched
//! (for input globs, the virtual input directory); absolute bases, which may
//! carry a provider scheme, resolve through the file system.

use std::collections::HashSet;

use globset::{GlobBuilder, GlobMatcher};
use indexmap::IndexMap;
use log::debug;

use crate::error::{Error, Result};
use crate::io::directory::Directory;
use crate::io::file::ProviderFile;
use crate::io::file_system::FileSystem;
use crate::path::{is_drive, split_scheme, DirectoryPath, FilePath, NormalizedPath};

const META_CHARS: &[char] = &['*', '?', '[', ']', '{', '}'];

/// A parsed glob pattern.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    raw: String,
    negated: bool,
    base: DirectoryPath,
    glob: String,
    matcher: GlobMatcher,
}

impl GlobPattern {
    /// Parse a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArgument`] for an empty pattern and
    /// [`Error::InvalidGlobPattern`] when the wildcard part does not compile
    /// or a scheme is attached to a relative pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use kiln::io::GlobPattern;
    ///
    /// let pattern = GlobPattern::parse("!posts/drafts/**/*.md").unwrap();
    /// assert!(pattern.is_negated());
    /// assert_eq!(pattern.base().to_string(), "posts/drafts");
    /// assert_eq!(pattern.glob(), "**/*.md");
    /// assert!(pattern.is_match(&"2024/wip.md".parse().unwrap()));
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let (negated, body) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        if body.is_empty() {
            return Err(Error::missing("pattern"));
        }

        let (scheme, rest) = split_scheme(body);
        let rest = rest.replace('\\', "/");
        let mut segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        let absolute = rest.starts_with('/') || segments.first().is_some_and(|s| is_drive(s));
        if !absolute && !scheme.is_empty() {
            return Err(invalid(raw, "a provider scheme requires an absolute pattern"));
        }
        if segments.is_empty() {
            segments.push("**");
        }

        let split = segments
            .iter()
            .position(|s| s.contains(META_CHARS))
            .unwrap_or(segments.len() - 1);
        let (literal, wildcard) = segments.split_at(split);
        let glob = wildcard.join("/");

        let base = NormalizedPath::from_parts(scheme, absolute, literal)
            .map_err(|e| invalid(raw, e.to_string()))?;
        let matcher = GlobBuilder::new(&glob)
            .literal_separator(true)
            .backslash_escape(false)
            .build()
            .map_err(|e| invalid(raw, e.to_string()))?
            .compile_matcher();

        Ok(Self {
            raw: raw.to_string(),
            negated,
            base: DirectoryPath::from_normalized(base),
            glob,
            matcher,
        })
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this is an exclusion pattern.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// The literal directory prefix of the pattern.
    #[must_use]
    pub fn base(&self) -> &DirectoryPath {
        &self.base
    }

    /// The wildcard remainder, matched against paths relative to the base.
    #[must_use]
    pub fn glob(&self) -> &str {
        &self.glob
    }

    /// Whether matching needs to look below the base directory's own files.
    #[must_use]
    pub fn is_recursive(&self) -> bool {
        self.glob.contains('/') || self.glob.contains("**")
    }

    /// Match a path relative to the base directory.
    #[must_use]
    pub fn is_match(&self, relative: &FilePath) -> bool {
        self.matcher.is_match(relative.full_path())
    }

    fn search_directory(
        &self,
        file_system: &FileSystem,
        directory: &dyn Directory,
    ) -> Result<Box<dyn Directory>> {
        if self.base.is_absolute() {
            Ok(Box::new(file_system.get_directory(&self.base)?))
        } else {
            directory.directory(&self.base)
        }
    }

    fn matches_in(
        &self,
        file_system: &FileSystem,
        directory: &dyn Directory,
    ) -> Result<Vec<ProviderFile>> {
        let search = self.search_directory(file_system, directory)?;
        let mut matched = Vec::new();
        for file in search.files(self.is_recursive())? {
            let Some(relative) = search.relative_path_of(file.path()) else {
                continue;
            };
            if self.is_match(&relative) {
                matched.push(file);
            }
        }
        Ok(matched)
    }
}

fn invalid(pattern: &str, reason: impl Into<String>) -> Error {
    Error::InvalidGlobPattern {
        pattern: pattern.to_string(),
        reason: reason.into(),
    }
}

/// Evaluate `patterns` against `directory`.
///
/// Results keep the order in which files were first matched and contain no
/// duplicates. An exclusion only removes files selected by an earlier
/// inclusion; a file it removes is never re-added by a later inclusion.
///
/// # Errors
///
/// Returns [`Error::MissingArgument`] for an empty pattern list or an empty
/// pattern, [`Error::InvalidGlobPattern`] for malformed patterns, and
/// propagates provider lookup and listing failures.
pub fn get_files<S: AsRef<str>>(
    file_system: &FileSystem,
    directory: &dyn Directory,
    patterns: &[S],
) -> Result<Vec<ProviderFile>> {
    if patterns.is_empty() {
        return Err(Error::missing("patterns"));
    }
    let patterns = patterns
        .iter()
        .map(|p| GlobPattern::parse(p.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let mut results: IndexMap<FilePath, ProviderFile> = IndexMap::new();
    let mut excluded: HashSet<FilePath> = HashSet::new();

    for pattern in &patterns {
        let matched = pattern.matches_in(file_system, directory)?;
        debug!(
            "Pattern '{}' matched {} file(s) under {}",
            pattern.as_str(),
            matched.len(),
            directory.path()
        );
        for file in matched {
            if pattern.is_negated() {
                if results.shift_remove(file.path()).is_some() {
                    excluded.insert(file.path().clone());
                }
            } else if !excluded.contains(file.path()) {
                results.entry(file.path().clone()).or_insert(file);
            }
        }
    }

    Ok(results.into_values().collect())
}
