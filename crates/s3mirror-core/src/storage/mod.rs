//! Local file lifecycle for downloads.
//!
//! Object bytes are written to a `.part` file next to the destination, synced,
//! and atomically renamed onto the final name, so a failed transfer never
//! leaves a truncated file under the real name.

mod writer;

pub use writer::PartFile;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `file.csv` → `file.csv.part`).
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}

/// Creates `dir` and all missing ancestors.
///
/// Succeeds if the directory already exists, including when another task
/// creates it concurrently.
pub async fn ensure_dir(dir: &std::path::Path) -> std::io::Result<()> {
    match tokio::fs::create_dir_all(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(e),
    }
}
