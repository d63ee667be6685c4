//! `s3mirror buckets` – list bucket names.

use anyhow::Result;
use s3mirror_core::remote::ObjectStore;

pub async fn run_buckets<S: ObjectStore + ?Sized>(store: &S) -> Result<()> {
    let buckets = store.list_buckets().await?;
    if buckets.is_empty() {
        println!("No buckets found.");
    }
    for name in buckets {
        println!("{name}");
    }
    Ok(())
}
