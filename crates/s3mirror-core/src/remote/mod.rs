//! Remote object storage: the [`ObjectStore`] seam, descriptors, and listing.
//!
//! The mirror workflow only depends on the trait. [`S3Store`] talks to an
//! S3-compatible service through the AWS SDK; [`MemoryStore`] keeps objects
//! in memory for tests and dry runs.

mod descriptor;
mod error;
mod memory;
mod s3;
mod storage_class;
mod uri;

pub use descriptor::{FileMeta, MetaHandler, RemoteFileDescriptor, SplitKey};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use s3::S3Store;
pub use storage_class::StorageClass;
pub use uri::BucketLocation;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;

use crate::sanitize::replace_line_breaks;

/// One entry of a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub storage_class: StorageClass,
}

/// Object store operations needed to mirror a bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Names of all buckets visible to the credentials.
    async fn list_buckets(&self) -> Result<Vec<String>, StoreError>;

    /// Every object under `prefix` (all pages).
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectSummary>, StoreError>;

    /// User metadata headers of a single object.
    async fn head_metadata(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<BTreeMap<String, String>, StoreError>;

    /// Writes the object's bytes to `dest`, returning the number of bytes written.
    /// Blocks until the transfer completes or fails.
    async fn download_to_path(
        &self,
        bucket: &str,
        key: &str,
        dest: &Path,
    ) -> Result<u64, StoreError>;
}

/// Lists the files in a bucket and attaches mirroring metadata to each.
///
/// Zero-size objects (folder placeholders) are skipped. User metadata is
/// fetched per object and passed to `handler` together with the key.
pub async fn list_files_in_bucket<S, H>(
    store: &S,
    bucket: &str,
    prefix: &str,
    handler: &H,
) -> Result<Vec<RemoteFileDescriptor>, StoreError>
where
    S: ObjectStore + ?Sized,
    H: MetaHandler + ?Sized,
{
    let objects = store.list_objects(bucket, prefix).await?;
    let mut files = Vec::with_capacity(objects.len());
    for object in objects {
        if object.size == 0 {
            tracing::debug!(key = %replace_line_breaks(&object.key), "skipping empty object");
            continue;
        }
        let headers = store.head_metadata(bucket, &object.key).await?;
        let meta = handler.file_meta(&object.key, headers);
        tracing::debug!("meta added - {}", replace_line_breaks(&meta.filename));
        files.push(RemoteFileDescriptor {
            key: object.key,
            size: object.size,
            storage_class: object.storage_class,
            meta,
        });
    }
    tracing::info!(bucket, count = files.len(), "fetched list of files from bucket");
    Ok(files)
}
