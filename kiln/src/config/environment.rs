//! Environment variable handling for configuration overrides.
//!
//! This module provides support for KILN_* environment variables that
//! override configuration file values.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Overrides the root path.
pub const ROOT_PATH_ENV: &str = "KILN_ROOT_PATH";
/// Overrides the output path.
pub const OUTPUT_PATH_ENV: &str = "KILN_OUTPUT_PATH";
/// Replaces the input paths; comma-separated.
pub const INPUT_PATHS_ENV: &str = "KILN_INPUT_PATHS";
/// Overrides `clean_output`.
pub const CLEAN_OUTPUT_ENV: &str = "KILN_CLEAN_OUTPUT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use kiln::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value, such as a
    /// non-boolean `KILN_CLEAN_OUTPUT` or an input list with no entries.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(root) = env::var(ROOT_PATH_ENV) {
            config.root_path = Some(root);
        }

        if let Ok(output) = env::var(OUTPUT_PATH_ENV) {
            config.output_path = Some(output);
        }

        if let Ok(inputs) = env::var(INPUT_PATHS_ENV) {
            config.input_paths = Some(Self::parse_list(INPUT_PATHS_ENV, &inputs)?);
        }

        if let Ok(val) = env::var(CLEAN_OUTPUT_ENV) {
            config.clean_output = Some(Self::parse_bool(CLEAN_OUTPUT_ENV, &val)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    /// Split a comma-separated list, trimming entries and dropping blanks.
    fn parse_list(field: &str, s: &str) -> Result<Vec<String>> {
        let items: Vec<String> = s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect();

        if items.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Must name at least one path".into(),
            });
        }
        Ok(items)
    }
}
