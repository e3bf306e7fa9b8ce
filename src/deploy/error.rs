// ABOUTME: Error types for deployment operations.
// ABOUTME: Every failure falls into configuration, missing state, or operation.

use crate::cdn::CdnError;
use crate::config::ConfigError;
use crate::outputs::{OutputError, OutputName};
use crate::sync::SyncError;
use crate::types::SiteName;

/// Errors from uploading or tearing down a website.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Invalid configuration. Raised before any network call.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// A required output has not been published yet.
    #[error(
        "the {output} of site '{site}' is not available; provision the website before uploading"
    )]
    MissingState { output: OutputName, site: SiteName },

    /// Syncing or emptying the bucket failed.
    #[error("sync failed: {0}")]
    Sync(#[from] SyncError),

    /// The invalidation request failed after the sync completed.
    #[error("cache invalidation failed: {0}")]
    Invalidation(#[from] CdnError),

    /// The output store could not be read.
    #[error("failed to resolve outputs: {0}")]
    Outputs(#[from] OutputError),
}

/// Coarse classification of a [`DeployError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    Configuration,
    MissingState,
    Operation,
}

impl DeployError {
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::Configuration(_) => DeployErrorKind::Configuration,
            DeployError::MissingState { .. } => DeployErrorKind::MissingState,
            DeployError::Sync(_) | DeployError::Invalidation(_) | DeployError::Outputs(_) => {
                DeployErrorKind::Operation
            }
        }
    }
}
