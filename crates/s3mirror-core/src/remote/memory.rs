//! In-memory object store.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{ObjectStore, ObjectSummary, StorageClass, StoreError};
use crate::storage::PartFile;

#[derive(Debug, Clone)]
struct MemoryObject {
    data: Vec<u8>,
    storage_class: StorageClass,
    metadata: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
struct Inner {
    buckets: BTreeMap<String, BTreeMap<String, MemoryObject>>,
    failing_keys: BTreeSet<String>,
    downloads: Vec<String>,
}

/// [`ObjectStore`] backed by in-process maps. Records every download so
/// callers can check which objects were actually fetched.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates an empty bucket (no-op if it exists).
    pub fn create_bucket(&self, bucket: &str) {
        self.lock().buckets.entry(bucket.to_string()).or_default();
    }

    /// Stores an object, creating the bucket if needed.
    pub fn put(&self, bucket: &str, key: &str, data: &[u8], storage_class: StorageClass) {
        self.lock().buckets.entry(bucket.to_string()).or_default().insert(
            key.to_string(),
            MemoryObject {
                data: data.to_vec(),
                storage_class,
                metadata: BTreeMap::new(),
            },
        );
    }

    /// Sets a user metadata header on an existing object.
    pub fn set_metadata(&self, bucket: &str, key: &str, name: &str, value: &str) {
        if let Some(object) = self
            .lock()
            .buckets
            .get_mut(bucket)
            .and_then(|objects| objects.get_mut(key))
        {
            object.metadata.insert(name.to_string(), value.to_string());
        }
    }

    /// Makes every download of `key` fail with a transport error.
    pub fn fail_downloads_of(&self, key: &str) {
        self.lock().failing_keys.insert(key.to_string());
    }

    /// Keys downloaded so far, in call order.
    pub fn downloads(&self) -> Vec<String> {
        self.lock().downloads.clone()
    }

    fn object(&self, bucket: &str, key: &str) -> Result<MemoryObject, StoreError> {
        self.lock()
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock().buckets.keys().cloned().collect())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectSummary>, StoreError> {
        let inner = self.lock();
        let objects = inner
            .buckets
            .get(bucket)
            .ok_or_else(|| {
                StoreError::transport("ListObjectsV2", format!("NoSuchBucket: {bucket}"))
            })?;
        Ok(objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, object)| ObjectSummary {
                key: key.clone(),
                size: object.data.len() as u64,
                storage_class: object.storage_class.clone(),
            })
            .collect())
    }

    async fn head_metadata(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<BTreeMap<String, String>, StoreError> {
        Ok(self.object(bucket, key)?.metadata)
    }

    async fn download_to_path(
        &self,
        bucket: &str,
        key: &str,
        dest: &Path,
    ) -> Result<u64, StoreError> {
        {
            let mut inner = self.lock();
            inner.downloads.push(key.to_string());
            if inner.failing_keys.contains(key) {
                return Err(StoreError::transport(
                    "GetObject",
                    format!("connection reset while fetching {key}"),
                ));
            }
        }
        let object = self.object(bucket, key)?;
        let mut part = PartFile::create(dest).await?;
        part.write_chunk(&object.data).await?;
        part.finalize().await
    }
}
