//! Copy command implementation.
//!
//! This module implements the `copy` command, which copies matching input
//! files to the output directory byte for byte.

use crate::error::CliError;
use crate::utils::{build_engine, GlobalOptions};
use clap::Args;
use kiln::modules::copy_files;

/// Copy input files to the output directory.
#[derive(Args)]
pub struct CopyCommand {
    /// Glob patterns selecting the input files
    #[arg(value_name = "PATTERN", required = true, allow_hyphen_values = true)]
    pub patterns: Vec<String>,

    /// Perform a dry run (show what would be copied without copying)
    #[arg(long)]
    pub dry_run: bool,
}

impl CopyCommand {
    /// Execute the copy command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = build_engine(global)?;

        if self.dry_run && !global.quiet {
            eprintln!("[DRY RUN] Matching input files...");
        }

        let result = copy_files(&engine, &self.patterns, self.dry_run)?;

        if global.quiet {
            // Quiet mode: just the count to stdout
            if !result.copied.is_empty() {
                println!("{}", result.copied.len());
            }
        } else if global.verbose || self.dry_run {
            for copied in &result.copied {
                println!("{} -> {}", copied.source, copied.destination);
            }
        }

        if !global.quiet {
            if self.dry_run {
                eprintln!("[DRY RUN] Would copy {} file(s)", result.copied.len());
            } else {
                eprintln!(
                    "Copied {} file(s), {} byte(s)",
                    result.copied.len(),
                    result.bytes
                );
            }
        }

        Ok(())
    }
}
