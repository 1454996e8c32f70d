//! Command to resolve a path the way the engine does.

use crate::error::CliError;
use crate::utils::{build_engine, parse_file_path, GlobalOptions};
use clap::Args;

/// Resolve a relative path against the input paths, or the output
/// directory with `--output`.
///
/// Absolute paths are printed unchanged. A missing input file resolves to
/// where it would be created beneath the first input path.
#[derive(Args)]
pub struct ResolveCommand {
    /// Path to resolve
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Resolve against the output directory instead of the input paths
    #[arg(long, conflicts_with = "containing")]
    pub output: bool,

    /// Print the input path containing an absolute PATH instead
    #[arg(long)]
    pub containing: bool,

    /// Fail with exit code 1 if the resolved file does not exist
    #[arg(long)]
    pub require: bool,
}

impl ResolveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = build_engine(global)?;
        let path = parse_file_path(&self.path)?;
        let fs = engine.file_system();

        if self.containing {
            if !path.is_absolute() {
                return Err(CliError::InvalidArguments(
                    "--containing needs an absolute path".to_string(),
                ));
            }
            return match fs.get_containing_input_path(&path)? {
                Some(input) => {
                    println!("{input}");
                    Ok(())
                }
                None => Err(CliError::SemanticFailure(format!(
                    "No input path contains {path}"
                ))),
            };
        }

        let file = if self.output {
            fs.get_output_file(&path)?
        } else {
            fs.get_input_file(&path)?
        };

        println!("{}", file.path());

        if !file.exists() {
            if self.require {
                return Err(CliError::SemanticFailure(format!(
                    "File not found: {}",
                    file.path()
                )));
            }
            if !global.quiet {
                eprintln!("(does not exist)");
            }
        }
        Ok(())
    }
}
