// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to keep bucket, distribution, and invalidation IDs apart.

mod domain_name;
mod id;
mod site_name;

pub use domain_name::{DomainName, DomainNameError};
pub use id::{BucketName, DistributionId, Id, InvalidationId, Resource};
pub use site_name::{SiteName, SiteNameError};
