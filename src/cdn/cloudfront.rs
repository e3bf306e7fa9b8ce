// ABOUTME: Amazon CloudFront implementation of the CDN trait.
// ABOUTME: Creates invalidations with a unique, time-based caller reference.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudfront::Client;
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};
use chrono::Utc;

use super::{Cdn, CdnError};
use crate::aws::SdkFailure;
use crate::types::{DistributionId, InvalidationId};

/// CDN backed by a CloudFront distribution.
#[derive(Clone)]
pub struct CloudFrontCdn {
    client: Client,
}

impl CloudFrontCdn {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

/// Caller references must be unique per distribution.
fn caller_reference() -> String {
    format!("skiff-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[async_trait]
impl Cdn for CloudFrontCdn {
    async fn create_invalidation(
        &self,
        distribution: &DistributionId,
        paths: &[String],
    ) -> Result<InvalidationId, CdnError> {
        let paths = Paths::builder()
            .quantity(paths.len() as i32)
            .set_items(Some(paths.to_vec()))
            .build()
            .map_err(|e| CdnError::Request(e.to_string()))?;

        let batch = InvalidationBatch::builder()
            .paths(paths)
            .caller_reference(caller_reference())
            .build()
            .map_err(|e| CdnError::Request(e.to_string()))?;

        let output = self
            .client
            .create_invalidation()
            .distribution_id(distribution.as_str())
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|err| {
                let failure = SdkFailure::from_sdk(&err);
                if failure.has_code("NoSuchDistribution") {
                    CdnError::DistributionNotFound(distribution.to_string())
                } else if failure.has_code("TooManyInvalidationsInProgress") {
                    CdnError::TooManyInvalidations(distribution.to_string())
                } else {
                    CdnError::Request(failure.summary)
                }
            })?;

        let id = output
            .invalidation()
            .map(|invalidation| invalidation.id().to_string())
            .unwrap_or_default();

        Ok(InvalidationId::new(id))
    }
}
