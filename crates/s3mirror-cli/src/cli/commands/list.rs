//! `s3mirror list <bucket>` – list files with their mirroring metadata.

use anyhow::Result;
use s3mirror_core::remote::{
    list_files_in_bucket, BucketLocation, ObjectStore, RemoteFileDescriptor, SplitKey,
};
use s3mirror_core::sanitize::replace_line_breaks;

pub async fn run_list<S: ObjectStore + ?Sized>(
    store: &S,
    bucket: &str,
    prefix: Option<&str>,
    json: bool,
) -> Result<()> {
    let location = BucketLocation::parse(bucket)?;
    let prefix = prefix.unwrap_or(&location.prefix);
    let files = list_files_in_bucket(store, &location.bucket, prefix, &SplitKey).await?;
    print!("{}", format_listing(&files, json)?);
    Ok(())
}

pub(crate) fn format_listing(files: &[RemoteFileDescriptor], json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(files)?;
        out.push('\n');
        return Ok(out);
    }
    if files.is_empty() {
        return Ok("No files in bucket.\n".to_string());
    }
    let mut out = format!("{:<20} {:>12} {}\n", "STORAGE CLASS", "SIZE", "KEY");
    for f in files {
        out.push_str(&format!(
            "{:<20} {:>12} {}\n",
            f.storage_class.as_str(),
            f.size,
            replace_line_breaks(&f.key)
        ));
    }
    Ok(out)
}
