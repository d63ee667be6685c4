//! Sanitized local destination for one remote file.

use std::path::PathBuf;

use crate::sanitize::{
    sanitize_filename, sanitize_folder_path, sanitize_folder_path_strict, FilenameRules,
    FolderRules, SanitizeError,
};

/// Where a remote file will be written. Computed right before the download
/// and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDestination {
    /// Sanitized, length-bounded directory.
    pub directory: String,
    /// Sanitized filename.
    pub filename: String,
    /// `directory` + separator + `filename`.
    pub full_path: String,
}

impl LocalDestination {
    fn new(directory: String, filename: &str, folder: &FolderRules, file: &FilenameRules) -> Self {
        let filename = sanitize_filename(filename, file);
        let full_path = if directory.is_empty() {
            filename.clone()
        } else {
            format!("{directory}{}{filename}", folder.separator)
        };
        Self {
            directory,
            filename,
            full_path,
        }
    }

    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.full_path)
    }

    pub fn directory_path(&self) -> PathBuf {
        PathBuf::from(&self.directory)
    }
}

/// Sanitizes `nested_dir` and `filename`, truncating an over-long directory.
pub fn local_destination(
    nested_dir: &str,
    filename: &str,
    folder: &FolderRules,
    file: &FilenameRules,
) -> LocalDestination {
    let directory = sanitize_folder_path(nested_dir, folder);
    LocalDestination::new(directory, filename, folder, file)
}

/// Like [`local_destination`], but fails on an over-long directory.
pub fn local_destination_strict(
    nested_dir: &str,
    filename: &str,
    folder: &FolderRules,
    file: &FilenameRules,
) -> Result<LocalDestination, SanitizeError> {
    let directory = sanitize_folder_path_strict(nested_dir, folder)?;
    Ok(LocalDestination::new(directory, filename, folder, file))
}
