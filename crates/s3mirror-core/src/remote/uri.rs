//! `s3://bucket/prefix` argument parsing.

use anyhow::{bail, Context, Result};

/// A bucket plus an optional key prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketLocation {
    pub bucket: String,
    pub prefix: String,
}

impl BucketLocation {
    /// Accepts either a bare bucket name or an `s3://bucket/prefix` URI.
    pub fn parse(input: &str) -> Result<Self> {
        if !input.contains("://") {
            if input.is_empty() || input.contains('/') {
                bail!("invalid bucket name: {input:?}");
            }
            return Ok(Self {
                bucket: input.to_string(),
                prefix: String::new(),
            });
        }

        let parsed =
            url::Url::parse(input).with_context(|| format!("invalid bucket URI: {input}"))?;
        if parsed.scheme() != "s3" {
            bail!("unsupported scheme `{}` in {input}; expected s3://", parsed.scheme());
        }
        let bucket = match parsed.host_str() {
            Some(h) if !h.is_empty() => h.to_string(),
            _ => bail!("missing bucket in {input}"),
        };
        // Take the prefix from the raw input: the parsed path is percent-encoded.
        let rest = &input[input.find("://").map(|i| i + 3).unwrap_or(0)..];
        let prefix = rest.split_once('/').map(|(_, p)| p).unwrap_or("").to_string();
        Ok(Self { bucket, prefix })
    }
}
