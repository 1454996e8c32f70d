//! Bridging between user-supplied path text, platform paths and normalized
//! paths.
//!
//! Configuration files and command-line arguments name directories the way a
//! user types them: with `~`, relative to the working directory, with
//! platform separators. This module turns those into absolute
//! [`DirectoryPath`]s:
//! - Expanding tilde (~) to the home directory
//! - Converting relative paths to absolute paths against a working directory
//! - Resolving `.` and `..` components

use std::path::Path;

use crate::error::{Error, Result};
use crate::path::{DirectoryPath, FilePath};

/// Expand tilde (~) to the home directory.
///
/// This function handles `~` and `~/path` but does not support `~user` syntax.
///
/// # Errors
///
/// Returns an error if:
/// - The home directory cannot be determined or is not valid UTF-8
/// - The path uses `~user` syntax (not supported)
///
/// # Examples
///
/// ```
/// use kiln::path::normalize::expand_tilde;
///
/// // Leaves other paths unchanged
/// assert_eq!(expand_tilde("/absolute").unwrap(), "/absolute");
/// assert_eq!(expand_tilde("alt::/x").unwrap(), "alt::/x");
///
/// // Expands ~/path to home/path
/// let expanded = expand_tilde("~/project").unwrap();
/// assert!(expanded.ends_with("project"));
/// ```
pub fn expand_tilde(raw: &str) -> Result<String> {
    if !raw.starts_with('~') {
        return Ok(raw.to_string());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: raw.to_string(),
        reason: "Cannot determine home directory".to_string(),
    })?;
    let home = home.to_str().ok_or_else(|| Error::InvalidPath {
        path: raw.to_string(),
        reason: "Home directory contains invalid UTF-8".to_string(),
    })?;

    if raw == "~" {
        Ok(home.to_string())
    } else if raw.starts_with("~/") || raw.starts_with("~\\") {
        Ok(format!("{}/{}", home.trim_end_matches(['/', '\\']), &raw[2..]))
    } else {
        // ~user syntax not supported
        Err(Error::InvalidPath {
            path: raw.to_string(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Convert a platform directory path to a [`DirectoryPath`].
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8 or cannot be normalized.
///
/// # Examples
///
/// ```
/// use kiln::path::normalize::directory_from_std;
/// use std::path::Path;
///
/// let dir = directory_from_std(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(dir.to_string(), "/a/c");
/// ```
pub fn directory_from_std(path: &Path) -> Result<DirectoryPath> {
    DirectoryPath::new(utf8(path)?)
}

/// Convert a platform file path to a [`FilePath`].
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8 or has no file name.
pub fn file_from_std(path: &Path) -> Result<FilePath> {
    FilePath::new(utf8(path)?)
}

fn utf8(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.display().to_string(),
        reason: "Path contains invalid UTF-8".to_string(),
    })
}

/// Normalize user path text to an absolute directory.
///
/// This is the main normalization function that:
/// 1. Expands tilde (~) if present
/// 2. Parses and collapses the path
/// 3. Resolves relative paths against `working_dir`
///
/// # Errors
///
/// Returns an error if:
/// - Tilde expansion fails
/// - `working_dir` is not valid UTF-8 or not absolute
/// - Path contains too many `..` components
///
/// # Examples
///
/// ```
/// use kiln::path::normalize::absolute_directory;
/// use std::path::Path;
///
/// let dir = absolute_directory("site/../blog", Path::new("/work")).unwrap();
/// assert_eq!(dir.to_string(), "/work/blog");
///
/// let dir = absolute_directory("/srv/site", Path::new("/work")).unwrap();
/// assert_eq!(dir.to_string(), "/srv/site");
/// ```
pub fn absolute_directory(raw: &str, working_dir: &Path) -> Result<DirectoryPath> {
    let expanded = expand_tilde(raw)?;
    let path = DirectoryPath::new(&expanded)?;
    if path.is_absolute() {
        return Ok(path);
    }

    let base = directory_from_std(working_dir)?;
    base.require_absolute()?;
    base.combine(&path)
}
