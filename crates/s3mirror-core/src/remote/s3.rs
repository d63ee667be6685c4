//! [`ObjectStore`] backed by the AWS SDK for S3.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::Client;
use std::collections::BTreeMap;
use std::path::Path;

use super::{ObjectStore, ObjectSummary, StorageClass, StoreError};
use crate::config::AwsConfig;
use crate::storage::PartFile;

/// S3 (or S3-compatible) object store.
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Builds a client from `aws`. Explicit keys become a static credentials
    /// provider; otherwise the SDK default chain (env, profile, IMDS) is used.
    pub async fn connect(aws: &AwsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &aws.region {
            loader = loader.region(aws_sdk_s3::config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &aws.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        if let (Some(key_id), Some(secret)) = (&aws.access_key_id, &aws.secret_access_key) {
            let credentials = Credentials::new(
                key_id,
                secret,
                aws.session_token.clone(),
                None,
                "s3mirror-config",
            );
            loader = loader.credentials_provider(credentials);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(aws.force_path_style)
            .build();
        Self {
            client: Client::from_conf(s3_config),
        }
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn transport_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> StoreError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    tracing::error!(operation, "{}", message);
    StoreError::transport(operation, message)
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| transport_error("ListBuckets", e))?;
        Ok(output
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(str::to_string))
            .collect())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectSummary>, StoreError> {
        let mut objects = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token.clone())
                .send()
                .await
                .map_err(|e| transport_error("ListObjectsV2", e))?;

            for object in output.contents() {
                let Some(key) = object.key() else { continue };
                objects.push(ObjectSummary {
                    key: key.to_string(),
                    size: object.size().unwrap_or(0).max(0) as u64,
                    storage_class: object
                        .storage_class()
                        .map(|c| StorageClass::from(c.as_str()))
                        .unwrap_or_default(),
                });
            }

            if output.is_truncated() == Some(true) {
                continuation_token = output.next_continuation_token().map(String::from);
                if continuation_token.is_none() {
                    break;
                }
            } else {
                break;
            }
        }

        tracing::debug!(bucket, prefix, count = objects.len(), "listed objects");
        Ok(objects)
    }

    async fn head_metadata(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<BTreeMap<String, String>, StoreError> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(output) => Ok(output
                .metadata()
                .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                .unwrap_or_default()),
            Err(err) => {
                if err.as_service_error().is_some_and(|e| e.is_not_found()) {
                    return Err(StoreError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    });
                }
                Err(transport_error("HeadObject", err))
            }
        }
    }

    async fn download_to_path(
        &self,
        bucket: &str,
        key: &str,
        dest: &Path,
    ) -> Result<u64, StoreError> {
        let output = match self.client.get_object().bucket(bucket).key(key).send().await {
            Ok(output) => output,
            Err(err) => {
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    return Err(StoreError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    });
                }
                return Err(transport_error("GetObject", err));
            }
        };

        let mut body = output.body;
        let mut part = PartFile::create(dest).await?;
        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| StoreError::transport("GetObject", DisplayErrorContext(&e).to_string()))?
        {
            part.write_chunk(&chunk).await?;
        }
        part.finalize().await
    }
}
