//! Property-based tests for extension splitting and strategies.

use proptest::prelude::*;

use super::extension::{reconstruct, separate, COMPOUND_EXTENSIONS};
use super::strategy::SanitizationStrategy;

// Names with no dots: cannot collide with compound suffixes and keep the
// round-trip property unconditional.
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 _-]{0,11}"
}

fn extension_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,10}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        .. ProptestConfig::default()
    })]

    // separate(reconstruct(name, ext)) round-trips for valid extensions.
    #[test]
    fn extension_round_trip(name in name_strategy(), ext in extension_strategy()) {
        let filename = reconstruct(&name, Some(&ext));
        let split = separate(&filename);

        prop_assert_eq!(split.name, name);
        prop_assert_eq!(split.extension, Some(ext));
    }

    // Extension-less names survive separate() whole.
    #[test]
    fn extensionless_round_trip(name in name_strategy()) {
        let split = separate(&name);
        prop_assert_eq!(split.name, name);
        prop_assert_eq!(split.extension, None);
    }

    // Every built-in strategy preserves the extension.
    #[test]
    fn strategies_preserve_extension(name in name_strategy(), ext in extension_strategy()) {
        let filename = reconstruct(&name, Some(&ext));

        for strategy in [
            SanitizationStrategy::Hashed,
            SanitizationStrategy::Slug,
            SanitizationStrategy::Snake,
            SanitizationStrategy::Timestamp,
        ] {
            let sanitized = strategy.apply(&filename);
            let split = separate(&sanitized);
            prop_assert_eq!(
                split.extension.as_deref(),
                Some(ext.as_str()),
                "strategy {:?} lost the extension of {:?} -> {:?}",
                strategy,
                filename,
                sanitized
            );
        }
    }

    // Compound suffixes always win over the generic last-dot rule.
    #[test]
    fn compound_suffix_wins(name in name_strategy(), idx in 0..COMPOUND_EXTENSIONS.len()) {
        let compound = COMPOUND_EXTENSIONS[idx];
        let filename = format!("{name}.{compound}");
        let split = separate(&filename);

        prop_assert_eq!(split.name, name);
        prop_assert_eq!(split.extension, Some(compound.to_string()));
    }

    // Slug output stays within its alphabet and is idempotent.
    // (Dot-free inputs: a fully-stripped name next to a preserved
    // extension is a degenerate hidden-file case, covered by unit tests.)
    #[test]
    fn slug_idempotent_and_clean(input in "[a-zA-Z0-9 _!@#&()+-]{0,40}") {
        let once = SanitizationStrategy::Slug.apply(&input);
        let twice = SanitizationStrategy::Slug.apply(&once);

        prop_assert_eq!(&once, &twice);

        let body = separate(&once).name;
        prop_assert!(body.chars().all(|c| c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || c == '-'));
        prop_assert!(!body.starts_with('-'));
        prop_assert!(!body.ends_with('-'));
    }

    // Snake output is lowercase and idempotent.
    #[test]
    fn snake_idempotent(input in "[a-zA-Z0-9 _-]{0,40}") {
        let once = SanitizationStrategy::Snake.apply(&input);
        let twice = SanitizationStrategy::Snake.apply(&once);

        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.chars().any(char::is_uppercase));
    }
}
