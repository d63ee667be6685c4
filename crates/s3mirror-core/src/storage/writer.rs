//! Sequential writer for a `.part` file that is renamed into place on success.

use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use super::temp_path;
use crate::remote::StoreError;

/// A download in progress. Bytes go to `<dest>.part` until [`PartFile::finalize`].
pub struct PartFile {
    file: File,
    temp_path: PathBuf,
    final_path: PathBuf,
    written: u64,
}

impl PartFile {
    /// Create (or truncate) the temp file for `final_path`.
    pub async fn create(final_path: &Path) -> Result<Self, StoreError> {
        let temp_path = temp_path(final_path);
        let file = File::create(&temp_path)
            .await
            .map_err(|e| StoreError::io(&temp_path, e))?;
        Ok(Self {
            file,
            temp_path,
            final_path: final_path.to_path_buf(),
            written: 0,
        })
    }

    /// Append `data` to the temp file.
    pub async fn write_chunk(&mut self, data: &[u8]) -> Result<(), StoreError> {
        self.file
            .write_all(data)
            .await
            .map_err(|e| StoreError::io(&self.temp_path, e))?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Path to the current temp file.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Sync, then atomically rename the temp file onto the final path.
    /// Returns the number of bytes written.
    pub async fn finalize(mut self) -> Result<u64, StoreError> {
        self.file
            .flush()
            .await
            .map_err(|e| StoreError::io(&self.temp_path, e))?;
        self.file
            .sync_all()
            .await
            .map_err(|e| StoreError::io(&self.temp_path, e))?;
        drop(self.file);

        tokio::fs::rename(&self.temp_path, &self.final_path)
            .await
            .map_err(|e| StoreError::io(&self.final_path, e))?;
        Ok(self.written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_then_finalize_renames_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.bin");

        let mut part = PartFile::create(&dest).await.unwrap();
        assert_eq!(part.temp_path(), dir.path().join("out.bin.part"));
        part.write_chunk(b"hello ").await.unwrap();
        part.write_chunk(b"world").await.unwrap();
        assert!(!dest.exists());

        let written = part.finalize().await.unwrap();
        assert_eq!(written, 11);
        assert!(!dir.path().join("out.bin.part").exists());
        assert_eq!(std::fs::read(&dest).unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn finalize_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.bin");
        std::fs::write(&dest, b"stale contents").unwrap();

        let mut part = PartFile::create(&dest).await.unwrap();
        part.write_chunk(b"new").await.unwrap();
        part.finalize().await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
    }

    #[tokio::test]
    async fn create_fails_in_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing").join("out.bin");
        let err = PartFile::create(&dest).await.err().unwrap();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
