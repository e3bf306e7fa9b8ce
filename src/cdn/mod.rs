// ABOUTME: Edge cache invalidation behind a CDN capability trait.
// ABOUTME: An unresolved distribution degrades to a skipped invalidation.

mod cloudfront;

pub use cloudfront::CloudFrontCdn;

use async_trait::async_trait;

use crate::types::{DistributionId, InvalidationId};

/// Path pattern covering every object served by the distribution.
pub const INVALIDATE_ALL: &str = "/*";

/// CDN operations.
#[async_trait]
pub trait Cdn: Send + Sync {
    /// Request invalidation of the given path patterns.
    async fn create_invalidation(
        &self,
        distribution: &DistributionId,
        paths: &[String],
    ) -> Result<InvalidationId, CdnError>;
}

/// Errors from CDN operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CdnError {
    #[error("distribution not found: {0}")]
    DistributionNotFound(String),

    #[error("too many invalidations in progress for distribution {0}")]
    TooManyInvalidations(String),

    #[error("invalidation request failed: {0}")]
    Request(String),
}

/// What the invalidator did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    /// An invalidation was created.
    Requested(InvalidationId),
    /// No distribution is provisioned yet, so there is no cache to clear.
    Skipped,
}

/// Invalidate every cached path of a distribution.
///
/// Callers only reach this after a sync that changed files. A `None`
/// distribution means the CDN has not been provisioned yet and is not an
/// error.
pub async fn invalidate<C>(
    cdn: &C,
    distribution: Option<&DistributionId>,
) -> Result<Invalidation, CdnError>
where
    C: Cdn + ?Sized,
{
    let Some(distribution) = distribution else {
        tracing::info!("Distribution not provisioned yet, skipping cache invalidation");
        return Ok(Invalidation::Skipped);
    };

    tracing::info!("Invalidating {} on distribution {}", INVALIDATE_ALL, distribution);
    let id = cdn
        .create_invalidation(distribution, &[INVALIDATE_ALL.to_string()])
        .await?;
    tracing::debug!("Created invalidation {}", id);

    Ok(Invalidation::Requested(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    #[async_trait]
    impl Cdn for Recorder {
        async fn create_invalidation(
            &self,
            distribution: &DistributionId,
            paths: &[String],
        ) -> Result<InvalidationId, CdnError> {
            self.calls
                .lock()
                .unwrap()
                .push((distribution.to_string(), paths.to_vec()));
            Ok(InvalidationId::new("I123"))
        }
    }

    #[tokio::test]
    async fn unresolved_distribution_is_skipped() {
        let cdn = Recorder::default();
        let result = invalidate(&cdn, None).await.unwrap();
        assert_eq!(result, Invalidation::Skipped);
        assert!(cdn.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolved_distribution_invalidates_everything() {
        let cdn = Recorder::default();
        let distribution = DistributionId::new("E2ABC");
        let result = invalidate(&cdn, Some(&distribution)).await.unwrap();

        assert_eq!(result, Invalidation::Requested(InvalidationId::new("I123")));
        let calls = cdn.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("E2ABC".to_string(), vec!["/*".to_string()]));
    }
}
