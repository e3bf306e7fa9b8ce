// ABOUTME: Composes output resolution, sync, and cache invalidation.
// ABOUTME: Implements post-deploy upload, on-demand upload, and pre-removal teardown.

use super::error::DeployError;
use super::outcome::{DeploymentOutcome, TeardownOutcome};
use crate::cdn::{self, Cdn, Invalidation};
use crate::config::Website;
use crate::diagnostics::{Diagnostics, Warning};
use crate::output::Output;
use crate::outputs::{OutputName, OutputResolver, OutputStore};
use crate::storage::ObjectStore;
use crate::sync::{SyncEngine, SyncOptions, SyncPlan};
use crate::types::BucketName;

/// Deploys one website to its provisioned bucket and distribution.
pub struct Deployer<S, C, O> {
    website: Website,
    store: S,
    cdn: C,
    outputs: OutputResolver<O>,
    options: SyncOptions,
}

impl<S, C, O> Deployer<S, C, O>
where
    S: ObjectStore,
    C: Cdn,
    O: OutputStore,
{
    pub fn new(website: Website, store: S, cdn: C, outputs: O, options: SyncOptions) -> Self {
        let outputs = OutputResolver::new(outputs, &website);
        Self {
            website,
            store,
            cdn,
            outputs,
            options,
        }
    }

    pub fn website(&self) -> &Website {
        &self.website
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cdn(&self) -> &C {
        &self.cdn
    }

    pub fn outputs(&self) -> &OutputResolver<O> {
        &self.outputs
    }

    /// Upload run automatically after provisioning. Reports nothing.
    pub async fn post_deploy_upload(
        &self,
        diagnostics: &mut Diagnostics,
    ) -> Result<DeploymentOutcome, DeployError> {
        self.run_upload(None, diagnostics).await
    }

    /// Upload requested by the user, with progress on `output`.
    pub async fn upload(
        &self,
        output: &Output,
        diagnostics: &mut Diagnostics,
    ) -> Result<DeploymentOutcome, DeployError> {
        self.run_upload(Some(output), diagnostics).await
    }

    /// Compute what an upload would change without touching the bucket.
    pub async fn plan_upload(&self) -> Result<SyncPlan, DeployError> {
        let bucket = self.require_bucket().await?;
        let plan = self.engine().plan(&self.website.path, &bucket).await?;
        Ok(plan)
    }

    /// Empty the bucket so the infrastructure can be destroyed.
    ///
    /// Without a provisioned bucket there is nothing to remove.
    pub async fn pre_remove(
        &self,
        diagnostics: &mut Diagnostics,
    ) -> Result<TeardownOutcome, DeployError> {
        let Some(bucket) = self.outputs.bucket_name().await? else {
            diagnostics.warn(Warning::nothing_to_remove(format!(
                "No bucket provisioned for site '{}', nothing to remove",
                self.website.site
            )));
            return Ok(TeardownOutcome {
                bucket: None,
                deleted: 0,
            });
        };

        let deleted = self.engine().empty(&bucket).await?;
        tracing::info!("Removed {} object(s) from {}", deleted, bucket);

        Ok(TeardownOutcome {
            bucket: Some(bucket.into_inner()),
            deleted,
        })
    }

    async fn run_upload(
        &self,
        output: Option<&Output>,
        diagnostics: &mut Diagnostics,
    ) -> Result<DeploymentOutcome, DeployError> {
        let progress = |message: &str| {
            if let Some(output) = output {
                output.progress(message);
            }
        };

        let bucket = self.require_bucket().await?;

        progress(&format!(
            "Syncing {} to {}",
            self.website.path.display(),
            bucket
        ));
        let result = self.engine().sync(&self.website.path, &bucket).await?;

        let mut invalidated = false;
        if result.has_changes {
            progress("Invalidating CDN cache");
            let distribution = self.outputs.distribution_id().await?;
            match cdn::invalidate(&self.cdn, distribution.as_ref()).await? {
                Invalidation::Requested(_) => invalidated = true,
                Invalidation::Skipped => diagnostics.warn(Warning::invalidation_skipped(
                    "No distribution provisioned yet, cache invalidation skipped",
                )),
            }
        }

        let domain = self.outputs.domain().await?;

        Ok(DeploymentOutcome {
            file_change_count: result.file_change_count,
            uploaded: result.uploaded,
            deleted: result.deleted,
            invalidated,
            domain,
        })
    }

    async fn require_bucket(&self) -> Result<BucketName, DeployError> {
        self.outputs
            .bucket_name()
            .await?
            .ok_or_else(|| DeployError::MissingState {
                output: OutputName::BucketName,
                site: self.website.site.clone(),
            })
    }

    fn engine(&self) -> SyncEngine<'_, S> {
        SyncEngine::new(&self.store, self.options)
    }
}
