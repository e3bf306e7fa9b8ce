// ABOUTME: Applies a sync plan against an object store with bounded parallelism.
// ABOUTME: Every file operation settles before the result is computed.

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use nonempty::NonEmpty;
use snafu::ResultExt;
use std::path::Path;

use super::error::{InterruptedSnafu, ListSnafu, ReadFileSnafu, SyncError, TransferFailure, TransferOp};
use super::plan::SyncPlan;
use super::scan::{LocalFile, scan_directory};
use super::{SyncOptions, SyncResult};
use crate::storage::{DELETE_BATCH_SIZE, ObjectStore, RemoteObject, StoreError};
use crate::types::BucketName;

/// One unit of work for the worker pool.
enum Task<'p> {
    Upload(&'p LocalFile),
    Delete(&'p [String]),
}

/// Outcome of a single task.
#[derive(Default)]
struct TaskReport {
    uploaded: usize,
    deleted: usize,
    failures: Vec<TransferFailure>,
}

/// Synchronizes a local directory into a bucket.
pub struct SyncEngine<'s, S: ?Sized> {
    store: &'s S,
    options: SyncOptions,
}

impl<'s, S: ObjectStore + ?Sized> SyncEngine<'s, S> {
    pub fn new(store: &'s S, options: SyncOptions) -> Self {
        Self { store, options }
    }

    /// Scan `local` and diff it against the bucket inventory. Read-only.
    pub async fn plan(&self, local: &Path, bucket: &BucketName) -> Result<SyncPlan, SyncError> {
        let root = local.to_path_buf();
        let local_files = tokio::task::spawn_blocking(move || scan_directory(&root))
            .await
            .context(InterruptedSnafu)??;

        let remote = self.list(bucket).await?;
        let plan = SyncPlan::compute(local_files, remote);

        tracing::info!(
            "Planned {} upload(s), {} deletion(s), {} unchanged",
            plan.uploads.len(),
            plan.deletes.len(),
            plan.unchanged
        );
        Ok(plan)
    }

    /// Execute every upload and deletion in `plan`.
    ///
    /// Operations run `concurrency` at a time and all of them settle before
    /// returning. If any failed after its retries, the error lists every
    /// failed key; completed operations are not undone.
    pub async fn apply(&self, bucket: &BucketName, plan: &SyncPlan) -> Result<SyncResult, SyncError> {
        let tasks = plan
            .uploads
            .iter()
            .map(Task::Upload)
            .chain(plan.deletes.chunks(DELETE_BATCH_SIZE).map(Task::Delete));

        let reports: Vec<Result<TaskReport, SyncError>> = stream::iter(tasks)
            .map(|task| self.execute(bucket, task))
            .buffer_unordered(self.options.concurrency.max(1))
            .collect()
            .await;

        let mut total = TaskReport::default();
        for report in reports {
            let report = report?;
            total.uploaded += report.uploaded;
            total.deleted += report.deleted;
            total.failures.extend(report.failures);
        }

        total.failures.sort_by(|a, b| a.key.cmp(&b.key));
        if let Some(failures) = NonEmpty::from_vec(total.failures) {
            return Err(SyncError::Transfer {
                failures,
                applied: total.uploaded + total.deleted,
            });
        }

        Ok(SyncResult::new(total.uploaded, total.deleted))
    }

    /// Plan and apply in one step.
    pub async fn sync(&self, local: &Path, bucket: &BucketName) -> Result<SyncResult, SyncError> {
        let plan = self.plan(local, bucket).await?;
        if plan.is_empty() {
            tracing::info!("Bucket {} is up to date", bucket);
            return Ok(SyncResult::unchanged());
        }
        self.apply(bucket, &plan).await
    }

    /// Delete every object in the bucket. Returns the number removed.
    pub async fn empty(&self, bucket: &BucketName) -> Result<usize, SyncError> {
        let remote = self.list(bucket).await?;
        let plan = SyncPlan {
            deletes: remote.into_iter().map(|object| object.key).collect(),
            ..SyncPlan::default()
        };

        tracing::info!("Emptying bucket {} ({} object(s))", bucket, plan.deletes.len());
        let result = self.apply(bucket, &plan).await?;
        Ok(result.deleted)
    }

    async fn list(&self, bucket: &BucketName) -> Result<Vec<RemoteObject>, SyncError> {
        let what = format!("list {bucket}");
        self.options
            .retry
            .run(&what, || self.store.list_objects(bucket))
            .await
            .context(ListSnafu {
                bucket: bucket.as_str(),
            })
    }

    async fn execute(&self, bucket: &BucketName, task: Task<'_>) -> Result<TaskReport, SyncError> {
        match task {
            Task::Upload(file) => self.upload(bucket, file).await,
            Task::Delete(keys) => Ok(self.delete(bucket, keys).await),
        }
    }

    async fn upload(&self, bucket: &BucketName, file: &LocalFile) -> Result<TaskReport, SyncError> {
        let body = Bytes::from(
            tokio::fs::read(&file.path)
                .await
                .context(ReadFileSnafu { path: &file.path })?,
        );
        let content_type = content_type(&file.path);
        let what = format!("upload {}", file.key);

        let result = self
            .options
            .retry
            .run(&what, || {
                self.store
                    .put_object(bucket, &file.key, body.clone(), &content_type)
            })
            .await;

        Ok(match result {
            Ok(()) => {
                tracing::debug!("Uploaded {} ({} bytes, {})", file.key, file.size, content_type);
                TaskReport {
                    uploaded: 1,
                    ..TaskReport::default()
                }
            }
            Err(error) => TaskReport {
                failures: vec![TransferFailure {
                    key: file.key.clone(),
                    op: TransferOp::Upload,
                    error,
                }],
                ..TaskReport::default()
            },
        })
    }

    async fn delete(&self, bucket: &BucketName, keys: &[String]) -> TaskReport {
        let what = format!("delete {} object(s)", keys.len());
        let result = self
            .options
            .retry
            .run(&what, || self.store.delete_objects(bucket, keys))
            .await;

        match result {
            Ok(()) => {
                for key in keys {
                    tracing::debug!("Deleted {}", key);
                }
                TaskReport {
                    deleted: keys.len(),
                    ..TaskReport::default()
                }
            }
            Err(StoreError::Rejected(rejected)) => TaskReport {
                deleted: keys.len().saturating_sub(rejected.len()),
                failures: rejected
                    .into_iter()
                    .map(|r| TransferFailure {
                        key: r.key,
                        op: TransferOp::Delete,
                        error: StoreError::Request(r.reason),
                    })
                    .collect(),
                ..TaskReport::default()
            },
            Err(error) => TaskReport {
                failures: keys
                    .iter()
                    .map(|key| TransferFailure {
                        key: key.clone(),
                        op: TransferOp::Delete,
                        error: error.clone(),
                    })
                    .collect(),
                ..TaskReport::default()
            },
        }
    }
}

/// MIME type for an upload, guessed from the file extension.
pub fn content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
