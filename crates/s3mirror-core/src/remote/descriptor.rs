//! Remote file descriptors and the key-to-metadata mapping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::StorageClass;

/// Local-mirroring metadata derived from an object's key and user metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// Last key segment; sanitized only when the file is written.
    pub filename: String,
    /// Key segments preceding the filename, in order.
    pub subfolders: Vec<String>,
    /// User metadata headers returned by the object store (e.g. uploader `org`).
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Sanitized local directory, set once the object has been downloaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A listed remote object plus the metadata needed to place it locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFileDescriptor {
    pub key: String,
    pub size: u64,
    pub storage_class: StorageClass,
    pub meta: FileMeta,
}

impl RemoteFileDescriptor {
    /// Builds a descriptor with metadata derived by [`SplitKey`].
    pub fn from_key(key: impl Into<String>, size: u64, storage_class: StorageClass) -> Self {
        let key = key.into();
        let meta = SplitKey.file_meta(&key, BTreeMap::new());
        Self {
            key,
            size,
            storage_class,
            meta,
        }
    }
}

/// Derives [`FileMeta`] for a listed object. Implement this to place files
/// by something other than their key (e.g. a metadata header).
pub trait MetaHandler: Send + Sync {
    fn file_meta(&self, key: &str, headers: BTreeMap<String, String>) -> FileMeta;
}

/// Default handler: last key segment is the filename, the rest are subfolders.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitKey;

impl MetaHandler for SplitKey {
    fn file_meta(&self, key: &str, headers: BTreeMap<String, String>) -> FileMeta {
        let mut parts: Vec<String> = key.split('/').map(str::to_string).collect();
        let filename = parts.pop().unwrap_or_default();
        FileMeta {
            filename,
            subfolders: parts,
            headers,
            location: None,
        }
    }
}
