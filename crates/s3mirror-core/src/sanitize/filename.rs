//! Filename sanitization.

use super::{replace_illegal, truncate_chars, FilenameRules, MAX_NAME_LENGTH};

/// Sanitizes a single file name.
///
/// - Replaces every illegal character with `rules.replacement`
/// - Limits length to 255 characters
/// - Strips trailing spaces and periods (`"a. "` becomes `"a"`)
///
/// Total over its input: an empty or all-illegal name yields a (possibly
/// empty) string, never an error.
pub fn sanitize_filename(name: &str, rules: &FilenameRules) -> String {
    let replaced = replace_illegal(name, &rules.illegal_chars, &rules.replacement);
    let capped = truncate_chars(&replaced, MAX_NAME_LENGTH);
    capped.trim_end_matches([' ', '.']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(name: &str) -> String {
        sanitize_filename(name, &FilenameRules::default())
    }

    #[test]
    fn replaces_colon_and_question_mark() {
        assert_eq!(sanitize("report: final?.pdf"), "report_ final_.pdf");
    }

    #[test]
    fn strips_trailing_period() {
        assert_eq!(sanitize("draft."), "draft");
    }

    #[test]
    fn strips_trailing_spaces_and_periods_repeatedly() {
        assert_eq!(sanitize("a. "), "a");
        assert_eq!(sanitize("notes . . "), "notes");
    }

    #[test]
    fn keeps_leading_dots() {
        assert_eq!(sanitize(".env"), ".env");
    }

    #[test]
    fn replaces_both_slashes() {
        assert_eq!(sanitize("a/b\\c.txt"), "a_b_c.txt");
    }

    #[test]
    fn replaces_control_whitespace() {
        assert_eq!(sanitize("tab\there\nnewline"), "tab_here_newline");
    }

    #[test]
    fn empty_and_all_illegal_inputs() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("..."), "");
        assert_eq!(sanitize("???"), "___");
    }

    #[test]
    fn caps_length_at_255_characters() {
        let long = "é".repeat(300);
        let out = sanitize(&long);
        assert_eq!(out.chars().count(), 255);
    }

    #[test]
    fn strips_after_truncation() {
        let mut name = "a".repeat(253);
        name.push_str(". tail");
        let out = sanitize(&name);
        assert_eq!(out, "a".repeat(253));
    }

    #[test]
    fn custom_replacement_and_set() {
        let rules = FilenameRules {
            replacement: "-".to_string(),
            illegal_chars: "#".to_string(),
        };
        assert_eq!(sanitize_filename("a#b:c", &rules), "a-b:c");
    }

    #[test]
    fn idempotent_under_cap() {
        let once = sanitize("Q1:summary <draft>.pdf. ");
        assert_eq!(sanitize(&once), once);
    }
}
