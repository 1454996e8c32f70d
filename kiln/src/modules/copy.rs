//! Copying input files straight to the output directory.
//!
//! Matched files keep their path relative to the input path they were found
//! under. Content is streamed between providers and never loaded into
//! documents.

use std::collections::HashSet;

use log::{debug, info};
use rayon::prelude::*;

use crate::engine::Engine;
use crate::error::Result;
use crate::io::ProviderFile;
use crate::path::FilePath;

/// A single planned or performed copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFile {
    /// The input file.
    pub source: FilePath,
    /// Where it lands in the output directory.
    pub destination: FilePath,
    /// Bytes copied; zero in dry-run mode.
    pub bytes: u64,
}

/// Result of a copy operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyResult {
    /// Files that were (or would be) copied, in match order.
    pub copied: Vec<CopiedFile>,
    /// Total bytes copied.
    pub bytes: u64,
}

/// Copy every input file matching `patterns` to the output directory.
///
/// # Arguments
///
/// * `engine` - Supplies the file system
/// * `patterns` - Glob patterns evaluated against the virtual input directory
/// * `dry_run` - If true, report what would be copied without copying
///
/// # Errors
///
/// Fails on a malformed pattern or when any copy fails. Copies already made
/// are not rolled back. When several input paths hold the same relative
/// file, only the highest-priority one is copied.
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
///
/// let preview = modules::copy_files(&engine, &["assets/**"], true).unwrap();
/// println!("Would copy {} files", preview.copied.len());
/// ```
pub fn copy_files<S: AsRef<str>>(
    engine: &Engine,
    patterns: &[S],
    dry_run: bool,
) -> Result<CopyResult> {
    let files = engine.file_system().get_input_files(patterns)?;

    // Earlier input paths shadow later ones at the same destination
    let mut seen = HashSet::new();
    let mut planned = Vec::with_capacity(files.len());
    for file in &files {
        let target = destination_of(engine, file)?;
        if seen.insert(target.path().clone()) {
            planned.push((file, target));
        } else {
            debug!("{} is shadowed at {}", file.path(), target.path());
        }
    }
    debug!(
        "Copying {} input file(s){}",
        planned.len(),
        if dry_run { " (dry run)" } else { "" }
    );

    let copied = planned
        .par_iter()
        .map(|(file, target)| -> Result<CopiedFile> {
            let bytes = if dry_run { 0 } else { file.copy_to(target)? };
            Ok(CopiedFile {
                source: file.path().clone(),
                destination: target.path().clone(),
                bytes,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let bytes = copied.iter().map(|c| c.bytes).sum();
    if !dry_run {
        info!("Copied {} file(s), {bytes} byte(s)", copied.len());
    }
    Ok(CopyResult { copied, bytes })
}

/// The output file an input file copies to.
fn destination_of(engine: &Engine, file: &ProviderFile) -> Result<ProviderFile> {
    let fs = engine.file_system();
    let source = file.path();
    let relative = match fs.get_containing_input_path(source)? {
        Some(root) => root.relative_file(source)?,
        None => source.file_name_path(),
    };
    fs.get_output_file(&relative)
}
