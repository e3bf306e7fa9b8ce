// ABOUTME: Deployment orchestration for a static website.
// ABOUTME: Uploads content, invalidates the CDN, and empties the bucket on removal.

mod error;
mod orchestrator;
mod outcome;

pub use error::{DeployError, DeployErrorKind};
pub use orchestrator::Deployer;
pub use outcome::{DeploymentOutcome, TeardownOutcome};
