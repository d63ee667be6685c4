//! Filename and folder-path sanitization for mirroring remote keys locally.
//!
//! Remote object keys may contain characters that are illegal in local
//! (notably Windows) file names. Filenames and folder paths are sanitized
//! separately: folder paths keep their separators and root prefix, filenames
//! are capped at 255 characters and lose trailing spaces and periods.

mod filename;
mod folder;
mod rules;

#[cfg(test)]
mod properties;

pub use filename::sanitize_filename;
pub use folder::{sanitize_folder_path, sanitize_folder_path_strict};
pub use rules::{FilenameRules, FolderRules, SanitizeError};

/// Characters illegal in both file and folder names.
pub const INVALID_CHARACTERS: &str = ":*?\"<>|\t\n\r\x0b\x0c";

/// Characters illegal in a single file name: the shared set plus both slashes.
pub const INVALID_FILENAME_CHARACTERS: &str = ":*?\"<>|\t\n\r\x0b\x0c/\\";

/// Max file/folder name length on Windows, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Replaces every character found in `illegal` with `replacement`.
pub(crate) fn replace_illegal(value: &str, illegal: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if illegal.contains(c) {
            out.push_str(replacement);
        } else {
            out.push(c);
        }
    }
    out
}

/// Keeps at most `max` characters of `value`.
pub(crate) fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Replaces line breaks with spaces so a key can be logged on one line.
pub fn replace_line_breaks(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
