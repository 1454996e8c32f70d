//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::Config;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn settings_strategy() -> impl Strategy<Value = BTreeMap<String, serde_yaml::Value>> {
    prop::collection::btree_map(
        "[A-Za-z]{1,8}",
        "[a-z0-9 ]{0,12}".prop_map(serde_yaml::Value::from),
        0..6,
    )
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("[a-z]{1,12}"),
        prop::option::of("[a-z]{1,12}"),
        prop::option::of(prop::collection::vec("[a-z]{1,8}", 1..4)),
        prop::option::of(any::<bool>()),
        settings_strategy(),
    )
        .prop_map(|(root_path, output_path, input_paths, clean_output, settings)| Config {
            root_path,
            output_path,
            input_paths,
            clean_output,
            settings,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // A set field in the higher layer always wins; an unset one keeps the lower value
    #[test]
    fn merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(&merged.root_path, if high.root_path.is_some() { &high.root_path } else { &low.root_path });
        prop_assert_eq!(&merged.output_path, if high.output_path.is_some() { &high.output_path } else { &low.output_path });
        prop_assert_eq!(&merged.input_paths, if high.input_paths.is_some() { &high.input_paths } else { &low.input_paths });
        prop_assert_eq!(merged.clean_output, high.clean_output.or(low.clean_output));
    }

    // Settings are the key union, with the higher layer's values on collision
    #[test]
    fn merge_settings_union(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        for (key, value) in &merged.settings {
            let expected = high.settings.get(key).or_else(|| low.settings.get(key));
            prop_assert_eq!(Some(value), expected);
        }
        for key in low.settings.keys().chain(high.settings.keys()) {
            prop_assert!(merged.settings.contains_key(key));
        }
    }

    // Merging a config into itself changes nothing
    #[test]
    fn merge_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Merging onto the empty config reproduces the source
    #[test]
    fn merge_onto_default_is_identity(config in config_strategy()) {
        let mut merged = Config::default();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }
}
