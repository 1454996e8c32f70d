//! Property-based tests for the metadata stack.

use super::{MetadataStack, Value};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,8}"
}

fn layer_strategy() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec((key_strategy(), any::<i64>()), 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Pushing a layer never changes what the original stack reports
    #[test]
    fn clone_with_is_non_destructive(base in layer_strategy(), top in layer_strategy()) {
        let stack = MetadataStack::from_items(base.clone());
        let before: Vec<(String, Value)> = stack
            .iter()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let _child = stack.clone_with(top);
        let after: Vec<(String, Value)> = stack
            .iter()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        prop_assert_eq!(before, after);
    }

    // The top layer wins for every key it defines
    #[test]
    fn top_layer_shadows(base in layer_strategy(), top in layer_strategy()) {
        let stack = MetadataStack::from_items(base).clone_with(top.clone());
        let mut expected = std::collections::HashMap::new();
        for (key, value) in &top {
            expected.insert(key.to_lowercase(), *value);
        }
        for (key, value) in expected {
            prop_assert_eq!(stack.get_i64(&key), Some(value));
        }
    }

    // Enumeration yields each key exactly once
    #[test]
    fn keys_are_unique(layers in prop::collection::vec(layer_strategy(), 1..5)) {
        let mut stack = MetadataStack::new();
        for layer in layers {
            stack = stack.clone_with(layer);
        }
        let keys: Vec<String> = stack.keys().iter().map(|k| k.to_lowercase()).collect();
        let unique: std::collections::HashSet<_> = keys.iter().collect();
        prop_assert_eq!(keys.len(), unique.len());
        prop_assert_eq!(keys.len(), stack.len());
    }
}
