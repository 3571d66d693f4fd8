//! Property-based tests for the path builder.
//!
//! Note: the normalize module carries its own property tests for
//! normalization. This module focuses on join semantics, the hierarchy
//! invariant, and the clone-vs-mutate ownership split.

use super::PathBuilder;
use crate::sanitize::HashAlgorithm;
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,12}"
}

fn segments_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment_strategy(), 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Join is associative for non-empty segments.
    #[test]
    fn join_associative(a in segment_strategy(), b in segment_strategy(), c in segment_strategy()) {
        let left = PathBuilder::join([PathBuilder::join([&a, &b]), c.clone()]);
        let right = PathBuilder::join([a.clone(), PathBuilder::join([&b, &c])]);
        prop_assert_eq!(left, right);
    }

    // Blank segments never contribute separators.
    #[test]
    fn build_ignores_blanks(parts in segments_strategy()) {
        let mut with_blanks: Vec<String> = Vec::new();
        for part in &parts {
            with_blanks.push(String::new());
            with_blanks.push(part.clone());
        }

        prop_assert_eq!(PathBuilder::build(&with_blanks), PathBuilder::build(&parts));
    }

    // Once a file is added, every directory-appending operation fails.
    #[test]
    fn hierarchy_invariant(parts in segments_strategy(), file in segment_strategy(), dir in segment_strategy()) {
        let mut builder = PathBuilder::base(&parts[0]);
        for part in &parts[1..] {
            builder = builder.add(part).unwrap();
        }
        let terminated = builder.add_file(&file);

        prop_assert!(terminated.add(&dir).unwrap_err().is_hierarchy_violation());
        prop_assert!(terminated.clone().add_timestamped_dir().unwrap_err().is_hierarchy_violation());
        prop_assert!(terminated
            .clone()
            .add_hashed_dir(&dir, HashAlgorithm::Md5)
            .unwrap_err()
            .is_hierarchy_violation());
    }

    // add() leaves the receiver's joined path unchanged.
    #[test]
    fn add_is_immutable(base in segment_strategy(), extra in segment_strategy()) {
        let builder = PathBuilder::base(&base);
        let before = builder.to_string();
        let appended = builder.add(&extra).unwrap();

        prop_assert_eq!(builder.to_string(), before);
        prop_assert!(appended.to_string().ends_with(&extra));
    }

    // replace_extension() leaves the receiver's joined path unchanged.
    #[test]
    fn replace_extension_is_immutable(name in segment_strategy()) {
        let builder = PathBuilder::base("files").add_file(&format!("{name}.pdf"));
        let before = builder.to_string();
        let replaced = builder.replace_extension("txt");

        prop_assert_eq!(builder.to_string(), before);
        prop_assert!(replaced.to_string().ends_with(".txt"));
    }

    // The joined path is always normalized: no separator runs, no
    // trailing separator.
    #[test]
    fn joined_path_is_normalized(parts in segments_strategy()) {
        let mut builder = PathBuilder::base(&parts[0]);
        for part in &parts[1..] {
            builder = builder.add(part).unwrap();
        }
        let joined = builder.ensure_trailing().to_string();

        prop_assert!(!joined.contains("//"));
        prop_assert!(!joined.ends_with('/'));
    }
}
