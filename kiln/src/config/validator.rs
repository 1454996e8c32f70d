//! Configuration validation.
//!
//! Path fields are checked for well-formedness only; whether they exist is
//! a question for the file system at build time.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::path::NormalizedPath;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use kiln::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::with_defaults()).unwrap();
///
/// let bad = Config { input_paths: Some(vec![]), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref root) = config.root_path {
            Self::validate_path("root_path", root)?;
        }

        if let Some(ref output) = config.output_path {
            Self::validate_path("output_path", output)?;
        }

        if let Some(ref inputs) = config.input_paths {
            if inputs.is_empty() {
                return Err(Error::Validation {
                    field: "input_paths".into(),
                    message: "At least one input path is required".into(),
                });
            }
            for (index, input) in inputs.iter().enumerate() {
                Self::validate_path(&format!("input_paths[{index}]"), input)?;
            }
        }

        for key in config.settings.keys() {
            if key.trim().is_empty() {
                return Err(Error::Validation {
                    field: "settings".into(),
                    message: "Setting keys cannot be empty".into(),
                });
            }
        }

        Ok(())
    }

    /// Validate one path string.
    fn validate_path(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Path cannot be empty".into(),
            });
        }

        if value.contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "Path cannot contain NUL characters".into(),
            });
        }

        NormalizedPath::parse(value).map_err(|e| Error::Validation {
            field: field.into(),
            message: e.to_string(),
        })?;

        Ok(())
    }
}
