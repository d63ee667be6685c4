//! Property-based tests for filename and folder-path sanitization.

use proptest::prelude::*;

use super::*;

/// Arbitrary names, biased towards characters the sanitizer cares about.
fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        ".*",
        "[a-zA-Z0-9 .:*?\"<>|/\\\\\t\n]{0,40}",
        "[a-z. ]{250,320}",
    ]
}

fn arb_folder_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9 .:*?<>|]{0,12}", 1..8).prop_map(|parts| parts.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_filename_has_no_illegal_chars_and_is_capped(name in arb_name()) {
        let out = sanitize_filename(&name, &FilenameRules::default());
        prop_assert!(out.chars().count() <= MAX_NAME_LENGTH);
        prop_assert!(!out.chars().any(|c| INVALID_FILENAME_CHARACTERS.contains(c)));
        prop_assert!(!out.ends_with(' ') && !out.ends_with('.'));
    }

    #[test]
    fn prop_filename_is_idempotent(name in arb_name()) {
        let rules = FilenameRules::default();
        let once = sanitize_filename(&name, &rules);
        prop_assert_eq!(sanitize_filename(&once, &rules), once);
    }

    #[test]
    fn prop_folder_path_is_bounded(path in arb_folder_path(), max in 1usize..64) {
        let rules = FolderRules::default().with_separator('/').with_max_length(max);
        let out = sanitize_folder_path(&path, &rules);
        prop_assert!(out.chars().count() <= max);
    }

    #[test]
    fn prop_folder_path_is_idempotent_when_not_truncated(path in arb_folder_path()) {
        let rules = FolderRules::default().with_separator('/').with_max_length(1024);
        let once = sanitize_folder_path(&path, &rules);
        prop_assert_eq!(sanitize_folder_path(&once, &rules), once);
    }

    #[test]
    fn prop_strict_matches_lossy_under_limit(path in arb_folder_path()) {
        let rules = FolderRules::default().with_separator('/').with_max_length(1024);
        prop_assert_eq!(
            sanitize_folder_path_strict(&path, &rules).unwrap(),
            sanitize_folder_path(&path, &rules)
        );
    }
}
