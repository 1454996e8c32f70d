//! Configuration schema definitions.
//!
//! This module defines the structure of kiln configuration files
//! (`kiln.yaml` and `kiln.local.yaml`) using serde for YAML parsing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::io::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};

/// Default root path, relative to the working directory.
pub const DEFAULT_ROOT_PATH: &str = ".";

/// Complete kiln configuration.
///
/// Every field is optional so partial files can be layered; see
/// [`ConfigMerger`](crate::config::ConfigMerger) for how layers combine.
///
/// # Examples
///
/// ```
/// use kiln::config::Config;
///
/// let config: Config = serde_yaml::from_str(
///     "root_path: ~/site\ninput_paths: [input, themes/plain]\nsettings:\n  Title: Blog\n",
/// ).unwrap();
/// assert_eq!(config.input_paths.as_ref().unwrap().len(), 2);
/// assert_eq!(config.settings["Title"], serde_yaml::Value::from("Blog"));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the site. Relative values resolve against the working
    /// directory; `~` expands to the home directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_path: Option<String>,

    /// Output directory. Relative values resolve against the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    /// Input search roots, highest priority first. Relative values resolve
    /// against the root; a scheme prefix selects another provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_paths: Option<Vec<String>>,

    /// Empty the output directory before writing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_output: Option<bool>,

    /// Values for the settings layer every document starts from.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, serde_yaml::Value>,
}

impl Config {
    /// The built-in defaults: root `.`, output `output`, a single `input`
    /// search root and no cleaning.
    ///
    /// # Examples
    ///
    /// ```
    /// use kiln::config::Config;
    ///
    /// let config = Config::with_defaults();
    /// assert_eq!(config.output_path.as_deref(), Some("output"));
    /// assert_eq!(config.clean_output, Some(false));
    /// ```
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            root_path: Some(DEFAULT_ROOT_PATH.to_string()),
            output_path: Some(DEFAULT_OUTPUT_PATH.to_string()),
            input_paths: Some(vec![DEFAULT_INPUT_PATH.to_string()]),
            clean_output: Some(false),
            settings: BTreeMap::new(),
        }
    }

    /// Whether the output directory should be emptied first.
    #[must_use]
    pub fn should_clean_output(&self) -> bool {
        self.clean_output.unwrap_or(false)
    }
}
