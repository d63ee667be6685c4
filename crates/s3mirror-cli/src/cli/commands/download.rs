//! `s3mirror download <bucket>` – mirror a bucket into a local directory.

use anyhow::{Context, Result};
use s3mirror_core::config::MirrorConfig;
use s3mirror_core::mirror::{Mirror, MirrorOptions, MirrorReport};
use s3mirror_core::remote::{BucketLocation, ObjectStore, SplitKey};
use std::path::Path;

pub async fn run_download<S: ObjectStore + ?Sized>(
    store: &S,
    cfg: &MirrorConfig,
    bucket: &str,
    prefix: Option<&str>,
    data_dir: &Path,
    jobs: usize,
    strict: bool,
) -> Result<MirrorReport> {
    let location = BucketLocation::parse(bucket)?;
    let prefix = prefix.unwrap_or(&location.prefix);

    let mut options = MirrorOptions::from_config(&cfg.sanitize).with_jobs(jobs);
    options.strict_path_length |= strict;

    let data_dir = data_dir.to_string_lossy();
    let report = Mirror::new(store, location.bucket.as_str(), options)
        .download_all(prefix, &data_dir, &SplitKey)
        .await
        .with_context(|| format!("mirror of s3://{}/{} failed", location.bucket, prefix))?;

    println!(
        "Downloaded {} file(s) ({} bytes) into {}; skipped {} archived file(s).",
        report.downloaded, report.bytes, data_dir, report.skipped
    );
    Ok(report)
}
