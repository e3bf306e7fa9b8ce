// ABOUTME: Local directory to object store synchronization.
// ABOUTME: Scans, diffs by content hash, and applies uploads and deletions.

mod engine;
mod error;
mod plan;
mod retry;
mod scan;

pub use engine::{SyncEngine, content_type};
pub use error::{SyncError, TransferFailure, TransferOp};
pub use plan::SyncPlan;
pub use retry::RetryPolicy;
pub use scan::{LocalFile, scan_directory};

use crate::config::SyncConfig;

/// Summary of one sync invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncResult {
    pub has_changes: bool,
    /// Uploads plus deletions.
    pub file_change_count: usize,
    pub uploaded: usize,
    pub deleted: usize,
}

impl SyncResult {
    pub fn new(uploaded: usize, deleted: usize) -> Self {
        let file_change_count = uploaded + deleted;
        Self {
            has_changes: file_change_count > 0,
            file_change_count,
            uploaded,
            deleted,
        }
    }

    pub fn unchanged() -> Self {
        Self::default()
    }
}

/// Tuning for the worker pool and retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Maximum file operations in flight.
    pub concurrency: usize,
    pub retry: RetryPolicy,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from(&SyncConfig::default())
    }
}

impl From<&SyncConfig> for SyncOptions {
    fn from(config: &SyncConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            retry: RetryPolicy {
                retries: config.retries,
                backoff: config.backoff,
            },
        }
    }
}
