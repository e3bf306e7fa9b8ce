// ABOUTME: Results reported by upload and teardown.
// ABOUTME: Serializable so the CLI can print them as JSON.

use serde::Serialize;

/// What an upload changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentOutcome {
    pub file_change_count: usize,
    pub uploaded: usize,
    pub deleted: usize,
    /// Whether an invalidation request was issued.
    pub invalidated: bool,
    /// First configured domain, else the CDN domain, if provisioned.
    pub domain: Option<String>,
}

impl DeploymentOutcome {
    pub fn url(&self) -> Option<String> {
        self.domain.as_ref().map(|d| format!("https://{d}"))
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        let files = match self.file_change_count {
            0 => "No files changed".to_string(),
            1 => "1 file changed".to_string(),
            n => format!("{n} files changed"),
        };
        match self.url() {
            Some(url) => format!("{files}, deployed to {url}"),
            None => files,
        }
    }
}

/// What a teardown removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeardownOutcome {
    /// The emptied bucket, or `None` if none was provisioned.
    pub bucket: Option<String>,
    pub deleted: usize,
}
