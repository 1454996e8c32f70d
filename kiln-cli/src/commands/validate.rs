//! Command to validate kiln configuration.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use kiln::config::{ConfigLoader, ConfigValidator};
use std::path::PathBuf;

/// Validate a configuration file, or the merged configuration when no file
/// is given.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: Option<PathBuf>,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let Some(path) = self.config_path else {
            load_configuration(global)?;
            println!("Configuration is valid");
            return Ok(());
        };

        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let result = ConfigLoader::load_file(&path)
            .and_then(|config| ConfigValidator::validate(&config));
        match result {
            Ok(()) => {
                println!("Configuration is valid");
                Ok(())
            }
            Err(e) => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ))
            }
        }
    }
}
