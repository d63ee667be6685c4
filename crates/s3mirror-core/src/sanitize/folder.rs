//! Folder-path sanitization.
//!
//! The first segment is treated as a root prefix when it is at most two
//! characters long (`C:`, `.`, `..`, or the empty segment before a leading
//! `/`). This is a heuristic: any two-character top-level folder name is
//! also passed through unsanitized.

use super::{replace_illegal, truncate_chars, FolderRules, SanitizeError};

/// Sanitizes a folder path, truncating it to `rules.max_length` characters
/// when it is too long.
///
/// Truncation is lossy and may make two distinct remote folders collide, so
/// it is reported with an error-level log event; the truncated path is still
/// returned.
pub fn sanitize_folder_path(path: &str, rules: &FolderRules) -> String {
    let joined = sanitize_segments(path, rules);
    let length = joined.chars().count();
    let bounded = if length > rules.max_length {
        tracing::error!(
            path = %joined,
            length,
            max_length = rules.max_length,
            "folder path exceeds max folder length, trimming to max length which may cause errors"
        );
        truncate_chars(&joined, rules.max_length).to_string()
    } else {
        joined
    };
    apply_separator(&bounded, rules.separator)
}

/// Like [`sanitize_folder_path`], but refuses to truncate.
pub fn sanitize_folder_path_strict(
    path: &str,
    rules: &FolderRules,
) -> Result<String, SanitizeError> {
    let joined = sanitize_segments(path, rules);
    let length = joined.chars().count();
    if length > rules.max_length {
        return Err(SanitizeError::PathTooLong {
            path: joined,
            length,
            max_length: rules.max_length,
        });
    }
    Ok(apply_separator(&joined, rules.separator))
}

/// Sanitizes each segment and rejoins them with `/`.
fn sanitize_segments(path: &str, rules: &FolderRules) -> String {
    let normalized = path.replace('\\', "/");
    normalized
        .split('/')
        .enumerate()
        .map(|(i, part)| {
            if i == 0 && is_root_prefix(part) {
                part.to_string()
            } else {
                replace_illegal(part, &rules.illegal_chars, &rules.replacement)
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_root_prefix(segment: &str) -> bool {
    segment.chars().count() <= 2
}

fn apply_separator(path: &str, separator: char) -> String {
    if separator == '/' {
        path.to_string()
    } else {
        path.replace('/', &separator.to_string())
    }
}
