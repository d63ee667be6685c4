//! Seeded in-memory bucket shared by the integration tests.

use s3mirror_core::remote::{MemoryStore, StorageClass};

pub const BUCKET: &str = "team-uploads";

/// A bucket with nested keys, an illegal filename, a folder placeholder,
/// and objects in both archival tiers.
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.put(BUCKET, "reports/", b"", StorageClass::Standard);
    store.put(BUCKET, "reports/2024/Q1:summary.pdf", b"q1 summary", StorageClass::Standard);
    store.put(BUCKET, "reports/2024/notes.txt.", b"notes", StorageClass::StandardIa);
    store.put(BUCKET, "reports/2019/old.pdf", b"old", StorageClass::Glacier);
    store.put(BUCKET, "archive/raw<1>/dump.csv", b"a,b", StorageClass::DeepArchive);
    store.put(BUCKET, "top-level.csv", b"x,y", StorageClass::Standard);
    store.set_metadata(BUCKET, "reports/2024/Q1:summary.pdf", "org", "finance");
    store
}
