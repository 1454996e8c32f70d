//! Property-based tests for path handling.

use super::{DirectoryPath, FilePath, NormalizedPath, PathRelationship};
use proptest::prelude::*;

// Strategy for generating path-like strings
fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

// Components that include navigation tokens
fn noisy_component_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => path_component_strategy(),
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

fn absolute_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(path_component_strategy(), 1..8)
        .prop_map(|parts| format!("/{}", parts.join("/")))
}

fn relative_noisy_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(noisy_component_strategy(), 1..8).prop_map(|parts| parts.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Normalization is idempotent: parse(display(parse(p))) == parse(p)
    #[test]
    fn path_normalization_idempotent(raw in relative_noisy_strategy()) {
        let once = NormalizedPath::parse(&raw).unwrap();
        let twice = NormalizedPath::parse(&once.to_string()).unwrap();
        prop_assert_eq!(once, twice);
    }

    // Normalized paths never contain "." segments, and ".." only as a prefix
    #[test]
    fn normalized_paths_are_collapsed(raw in relative_noisy_strategy()) {
        let path = NormalizedPath::parse(&raw).unwrap();
        prop_assert!(!path.segments().iter().any(|s| s == "."));
        let first_normal = path.segments().iter().position(|s| s != "..");
        if let Some(idx) = first_normal {
            prop_assert!(!path.segments()[idx..].iter().any(|s| s == ".."));
        }
    }

    // Combining then re-combining with "." is stable
    #[test]
    fn combine_is_stable(base in absolute_path_strategy(), rel in relative_noisy_strategy()) {
        let base = DirectoryPath::new(&base).unwrap();
        let rel = DirectoryPath::new(&rel).unwrap();
        if let Ok(combined) = base.combine(&rel) {
            let again = combined.combine(&DirectoryPath::current()).unwrap();
            prop_assert_eq!(&combined, &again);
            prop_assert_eq!(DirectoryPath::new(&combined.to_string()).unwrap(), combined);
        }
    }

    // relative_file is the inverse of combine_file
    #[test]
    fn relative_path_round_trips(
        base in absolute_path_strategy(),
        target in absolute_path_strategy(),
        name in path_component_strategy()
    ) {
        let base = DirectoryPath::new(&base).unwrap();
        let file = FilePath::new(&format!("{target}/{name}.txt")).unwrap();
        let rel = base.relative_file(&file).unwrap();
        prop_assert!(rel.is_relative());
        prop_assert_eq!(base.combine_file(&rel).unwrap(), file);
    }

    // Path relationship is reflexive
    #[test]
    fn path_relationship_reflexive(raw in absolute_path_strategy()) {
        let path = NormalizedPath::parse(&raw).unwrap();
        prop_assert_eq!(PathRelationship::between(&path, &path), PathRelationship::Same);
    }

    // Containment is transitive
    #[test]
    fn path_containment_transitive(base in absolute_path_strategy(), parts1 in 1..5usize, parts2 in 1..5usize) {
        let a = DirectoryPath::new(&base).unwrap();
        let mut b = a.clone();
        for i in 0..parts1 {
            b = b.combine(&DirectoryPath::new(&format!("sub{i}")).unwrap()).unwrap();
        }
        let mut c = b.clone();
        for i in 0..parts2 {
            c = c.combine(&DirectoryPath::new(&format!("deep{i}")).unwrap()).unwrap();
        }

        prop_assert_eq!(PathRelationship::between(&a, &b), PathRelationship::Ancestor);
        prop_assert_eq!(PathRelationship::between(&b, &c), PathRelationship::Ancestor);
        prop_assert_eq!(PathRelationship::between(&a, &c), PathRelationship::Ancestor);
    }

    // Relationship is antisymmetric
    #[test]
    fn path_relationship_antisymmetric(a in absolute_path_strategy(), b in absolute_path_strategy()) {
        let a = NormalizedPath::parse(&a).unwrap();
        let b = NormalizedPath::parse(&b).unwrap();
        let forward = PathRelationship::between(&a, &b);
        let backward = PathRelationship::between(&b, &a);
        let expected = match forward {
            PathRelationship::Ancestor => PathRelationship::Descendant,
            PathRelationship::Descendant => PathRelationship::Ancestor,
            other => other,
        };
        prop_assert_eq!(backward, expected);
    }
}
