// ABOUTME: Amazon S3 implementation of the object store.
// ABOUTME: Paginated listing, single-part puts, and batched deletes.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use bytes::Bytes;

use super::{ObjectStore, RejectedKey, RemoteObject, StoreError, normalize_etag};
use crate::aws::SdkFailure;
use crate::types::BucketName;

/// Object store backed by an S3 bucket.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn map_sdk_error<E>(bucket: &BucketName, err: SdkError<E, HttpResponse>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let failure = SdkFailure::from_sdk(&err);
    if failure.has_code("NoSuchBucket") {
        StoreError::BucketNotFound(bucket.to_string())
    } else if failure.has_code("AccessDenied") {
        StoreError::AccessDenied(failure.summary)
    } else if failure.transient {
        StoreError::Transient(failure.summary)
    } else {
        StoreError::Request(failure.summary)
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_objects(&self, bucket: &BucketName) -> Result<Vec<RemoteObject>, StoreError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket.as_str())
            .into_paginator()
            .send();

        let mut objects = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| map_sdk_error(bucket, e))?;
            objects.extend(page.contents().iter().filter_map(|object| {
                object.key().map(|key| RemoteObject {
                    key: key.to_string(),
                    size: object.size().unwrap_or(0).max(0) as u64,
                    etag: object.e_tag().map(normalize_etag),
                })
            }));
        }

        tracing::debug!("Listed {} object(s) in {}", objects.len(), bucket);
        Ok(objects)
    }

    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(bucket.as_str())
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| map_sdk_error(bucket, e))?;

        Ok(())
    }

    async fn delete_objects(
        &self,
        bucket: &BucketName,
        keys: &[String],
    ) -> Result<(), StoreError> {
        if keys.is_empty() {
            return Ok(());
        }

        let identifiers = keys
            .iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let delete = Delete::builder()
            .set_objects(Some(identifiers))
            .quiet(true)
            .build()
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let output = self
            .client
            .delete_objects()
            .bucket(bucket.as_str())
            .delete(delete)
            .send()
            .await
            .map_err(|e| map_sdk_error(bucket, e))?;

        let rejected: Vec<RejectedKey> = output
            .errors()
            .iter()
            .map(|error| RejectedKey {
                key: error.key().unwrap_or_default().to_string(),
                reason: error
                    .message()
                    .or(error.code())
                    .unwrap_or("unknown error")
                    .to_string(),
            })
            .collect();

        if rejected.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Rejected(rejected))
        }
    }
}
