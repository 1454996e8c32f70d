//! Configuration merging and precedence handling.
//!
//! Scalars from a higher-precedence layer overwrite lower ones. The
//! `input_paths` list is replaced as a whole, never concatenated, and
//! `settings` accumulate key by key.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use kiln::config::{Config, ConfigMerger};
///
/// let low = Config { output_path: Some("out".to_string()), ..Default::default() };
/// let high = Config { output_path: Some("public".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.output_path.as_deref(), Some("public"));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`; `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.root_path.is_some() {
            target.root_path.clone_from(&source.root_path);
        }

        if source.output_path.is_some() {
            target.output_path.clone_from(&source.output_path);
        }

        // Search roots are an ordered priority list: replace, don't merge
        if source.input_paths.is_some() {
            target.input_paths.clone_from(&source.input_paths);
        }

        if source.clean_output.is_some() {
            target.clean_output = source.clean_output;
        }

        for (key, value) in &source.settings {
            target.settings.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source(config: Config, precedence: u8) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from("kiln.yaml"),
            precedence,
            config,
        }
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(ConfigMerger::merge(vec![]), Config::default());
    }

    #[test]
    fn test_merge_unset_fields_keep_lower_values() {
        let mut target = Config::with_defaults();
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target, Config::with_defaults());
    }

    #[test]
    fn test_input_paths_replaced() {
        let low = Config {
            input_paths: Some(vec!["a".into(), "b".into()]),
            ..Default::default()
        };
        let high = Config {
            input_paths: Some(vec!["c".into()]),
            ..Default::default()
        };
        let merged = ConfigMerger::merge(vec![source(low, 1), source(high, 2)]);
        assert_eq!(merged.input_paths, Some(vec!["c".to_string()]));
    }

    #[test]
    fn test_settings_accumulate() {
        let mut low = Config::default();
        low.settings.insert("Title".into(), "Low".into());
        low.settings.insert("Author".into(), "Ada".into());
        let mut high = Config::default();
        high.settings.insert("Title".into(), "High".into());

        let merged = ConfigMerger::merge(vec![source(low, 1), source(high, 2)]);
        assert_eq!(merged.settings.len(), 2);
        assert_eq!(merged.settings["Title"], serde_yaml::Value::from("High"));
        assert_eq!(merged.settings["Author"], serde_yaml::Value::from("Ada"));
    }

    #[test]
    fn test_clean_output_false_overrides_true() {
        let mut target = Config {
            clean_output: Some(true),
            ..Default::default()
        };
        ConfigMerger::merge_into(
            &mut target,
            &Config {
                clean_output: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(target.clean_output, Some(false));
    }
}
