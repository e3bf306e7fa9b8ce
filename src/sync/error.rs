// ABOUTME: Sync engine error types with SNAFU context selectors.
// ABOUTME: Every failure names the path, key, or bucket it concerns.

use nonempty::NonEmpty;
use snafu::Snafu;
use std::fmt;
use std::path::PathBuf;

use crate::storage::StoreError;

/// Which remote operation failed for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOp {
    Upload,
    Delete,
}

impl fmt::Display for TransferOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferOp::Upload => write!(f, "upload"),
            TransferOp::Delete => write!(f, "delete"),
        }
    }
}

/// A file operation that failed after exhausting its retries.
#[derive(Debug, Clone)]
pub struct TransferFailure {
    pub key: String,
    pub op: TransferOp,
    pub error: StoreError,
}

impl fmt::Display for TransferFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of '{}' failed: {}", self.op, self.key, self.error)
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SyncError {
    #[snafu(display("local directory {} does not exist", path.display()))]
    MissingDirectory { path: PathBuf },

    #[snafu(display("failed to walk {}: {source}", path.display()))]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("path {} is not valid UTF-8", path.display()))]
    NonUtf8Path { path: PathBuf },

    #[snafu(display("failed to list bucket {bucket}: {source}"))]
    List { bucket: String, source: StoreError },

    #[snafu(display("directory scan was interrupted: {source}"))]
    Interrupted { source: tokio::task::JoinError },

    #[snafu(display(
        "{} file operation(s) failed after {applied} succeeded; first: {}",
        failures.len(),
        failures.first()
    ))]
    Transfer {
        failures: NonEmpty<TransferFailure>,
        applied: usize,
    },
}

impl SyncError {
    /// Failed file operations, if this is a transfer failure.
    pub fn failures(&self) -> Option<&NonEmpty<TransferFailure>> {
        match self {
            SyncError::Transfer { failures, .. } => Some(failures),
            _ => None,
        }
    }
}
