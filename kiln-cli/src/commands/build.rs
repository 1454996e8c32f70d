//! Build command implementation.
//!
//! This module implements the `build` command: read every matching input
//! file into a document and write it back out beneath the output directory
//! at the same relative path.

use crate::error::CliError;
use crate::utils::{build_engine, GlobalOptions};
use clap::Args;
use kiln::modules::{read_files, write_files};

/// Read input files and write them to the output directory.
#[derive(Args)]
pub struct BuildCommand {
    /// Glob patterns selecting the input files
    #[arg(value_name = "PATTERN", default_value = "**/*", allow_hyphen_values = true)]
    pub patterns: Vec<String>,

    /// Empty the output directory first, regardless of configuration
    #[arg(long)]
    pub clean: bool,
}

impl BuildCommand {
    /// Execute the build command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut engine = build_engine(global)?;
        if self.clean {
            engine = engine.with_clean_output(true);
        }

        engine.prepare_output()?;

        let documents = read_files(&engine, &self.patterns)?;
        let result = write_files(&engine, &documents)?;

        for document in documents.iter().chain(&result.written) {
            document.dispose()?;
        }

        if global.quiet {
            return Ok(());
        }

        if global.verbose {
            for document in &result.written {
                if let Some(destination) = document
                    .metadata()
                    .get_string(kiln::metadata::keys::DESTINATION_FILE_PATH)
                {
                    eprintln!("  - {destination}");
                }
            }
        }
        eprintln!(
            "Wrote {} file(s), {} byte(s) to {}",
            result.written.len(),
            result.bytes,
            engine.file_system().output_path()
        );
        if result.skipped > 0 {
            eprintln!("Skipped {} document(s) without a destination", result.skipped);
        }

        Ok(())
    }
}
