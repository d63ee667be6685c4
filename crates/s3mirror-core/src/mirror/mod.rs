//! Mirror workflow: list a bucket and download each object into a sanitized
//! local path that reproduces its key's folder structure.
//!
//! Objects in archival tiers are skipped with a warning. Transport failures
//! abort the run and are returned to the caller untouched.

mod error;


pub use error::MirrorError;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures::stream::{self, StreamExt, TryStreamExt};
use tokio::sync::OwnedMutexGuard;

use crate::config::SanitizeConfig;
use crate::layout::{
    local_destination, local_destination_strict, LocalDestination, NestedSubfolders, PathResolver,
};
use crate::remote::{list_files_in_bucket, MetaHandler, ObjectStore, RemoteFileDescriptor};
use crate::sanitize::{FilenameRules, FolderRules};
use crate::storage;

/// Sanitization and concurrency settings for a mirror run.
#[derive(Debug, Clone)]
pub struct MirrorOptions {
    pub filename_rules: FilenameRules,
    pub folder_rules: FolderRules,
    /// Fail on over-long folder paths instead of truncating them.
    pub strict_path_length: bool,
    /// Maximum concurrent downloads (1 = sequential).
    pub jobs: usize,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            filename_rules: FilenameRules::default(),
            folder_rules: FolderRules::default(),
            strict_path_length: false,
            jobs: 1,
        }
    }
}

impl MirrorOptions {
    pub fn from_config(cfg: &SanitizeConfig) -> Self {
        Self {
            filename_rules: cfg.filename_rules(),
            folder_rules: cfg.folder_rules(),
            strict_path_length: cfg.strict_path_length,
            jobs: 1,
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }
}

/// Result of a mirror run. `files` keeps listing order; downloaded entries
/// have `meta.location` set.
#[derive(Debug, Clone, Default)]
pub struct MirrorReport {
    pub files: Vec<RemoteFileDescriptor>,
    pub downloaded: usize,
    pub skipped: usize,
    pub bytes: u64,
}

enum Outcome {
    Downloaded(u64),
    Skipped,
}

/// One lock per destination path, so keys that sanitize to the same local
/// file are written one after another and the later one wins.
#[derive(Default)]
struct DestinationLocks(Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>);

impl DestinationLocks {
    async fn acquire(&self, full_path: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(map.entry(full_path.to_string()).or_default())
        };
        lock.lock_owned().await
    }
}

/// Downloads descriptors from one bucket through an [`ObjectStore`].
pub struct Mirror<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    bucket: String,
    options: MirrorOptions,
    resolver: Box<dyn PathResolver + 'a>,
}

impl<'a, S: ObjectStore + ?Sized> Mirror<'a, S> {
    /// Mirror with the default [`NestedSubfolders`] layout.
    pub fn new(store: &'a S, bucket: impl Into<String>, options: MirrorOptions) -> Self {
        let resolver = NestedSubfolders {
            separator: options.folder_rules.separator,
        };
        Self {
            store,
            bucket: bucket.into(),
            options,
            resolver: Box::new(resolver),
        }
    }

    /// Replace the directory layout.
    pub fn with_resolver(mut self, resolver: impl PathResolver + 'a) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Sanitized destination for `file` under `data_dir`.
    pub fn destination(
        &self,
        file: &RemoteFileDescriptor,
        data_dir: &str,
    ) -> Result<LocalDestination, MirrorError> {
        let nested = self.resolver.nested_dir(data_dir, &file.meta);
        let opts = &self.options;
        if opts.strict_path_length {
            Ok(local_destination_strict(
                &nested,
                &file.meta.filename,
                &opts.folder_rules,
                &opts.filename_rules,
            )?)
        } else {
            Ok(local_destination(
                &nested,
                &file.meta.filename,
                &opts.folder_rules,
                &opts.filename_rules,
            ))
        }
    }

    async fn download_file(
        &self,
        mut file: RemoteFileDescriptor,
        data_dir: &str,
        locks: &DestinationLocks,
    ) -> Result<(RemoteFileDescriptor, Outcome), MirrorError> {
        if file.storage_class.is_archived() {
            let nested = self.resolver.nested_dir(data_dir, &file.meta);
            tracing::warn!(
                key = %file.key,
                storage_class = %file.storage_class,
                "file in long term storage & cannot be retrieved without a restore - {}{}{}",
                nested,
                self.options.folder_rules.separator,
                file.meta.filename
            );
            return Ok((file, Outcome::Skipped));
        }

        let dest = self.destination(&file, data_dir)?;
        if dest.filename.is_empty() {
            tracing::warn!(
                key = %file.key,
                "filename is empty after sanitizing, skipping - {}",
                dest.full_path
            );
            return Ok((file, Outcome::Skipped));
        }

        let _guard = locks.acquire(&dest.full_path).await;
        let dir = dest.directory_path();
        storage::ensure_dir(&dir)
            .await
            .map_err(|source| MirrorError::CreateDir { path: dir, source })?;

        let bytes = self
            .store
            .download_to_path(&self.bucket, &file.key, &dest.path())
            .await?;
        tracing::info!(key = %file.key, bytes, "downloaded - {}", dest.full_path);
        file.meta.location = Some(dest.directory);
        Ok((file, Outcome::Downloaded(bytes)))
    }

    /// Downloads every non-archived file into `data_dir`.
    ///
    /// Up to `options.jobs` files are fetched at once; files sharing a local
    /// path are never fetched at the same time. The first transport or
    /// filesystem error stops the run.
    pub async fn download_files(
        &self,
        files: Vec<RemoteFileDescriptor>,
        data_dir: &str,
    ) -> Result<MirrorReport, MirrorError> {
        let locks = DestinationLocks::default();
        let results: Vec<(RemoteFileDescriptor, Outcome)> = stream::iter(files)
            .map(|file| self.download_file(file, data_dir, &locks))
            .buffered(self.options.jobs.max(1))
            .try_collect()
            .await?;

        let mut report = MirrorReport::default();
        for (file, outcome) in results {
            match outcome {
                Outcome::Downloaded(bytes) => {
                    report.downloaded += 1;
                    report.bytes += bytes;
                }
                Outcome::Skipped => report.skipped += 1,
            }
            report.files.push(file);
        }
        tracing::info!(
            bucket = %self.bucket,
            downloaded = report.downloaded,
            skipped = report.skipped,
            "all files downloaded"
        );
        Ok(report)
    }

    /// Lists `prefix` through `handler`, then downloads everything into `data_dir`.
    pub async fn download_all<H: MetaHandler + ?Sized>(
        &self,
        prefix: &str,
        data_dir: &str,
        handler: &H,
    ) -> Result<MirrorReport, MirrorError> {
        let files = list_files_in_bucket(self.store, &self.bucket, prefix, handler).await?;
        self.download_files(files, data_dir).await
    }
}

/// Convenience wrapper: list and download a whole bucket with default layout.
pub async fn download_all_files_from_bucket<S, H>(
    store: &S,
    bucket: &str,
    prefix: &str,
    data_dir: &str,
    handler: &H,
    options: MirrorOptions,
) -> Result<MirrorReport, MirrorError>
where
    S: ObjectStore + ?Sized,
    H: MetaHandler + ?Sized,
{
    Mirror::new(store, bucket, options)
        .download_all(prefix, data_dir, handler)
        .await
}
