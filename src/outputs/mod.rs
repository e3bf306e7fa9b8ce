// ABOUTME: Resolution of infrastructure outputs published by provisioning.
// ABOUTME: Absent outputs resolve to None; only store failures are errors.

mod file;
mod stack;

pub use file::FileOutputStore;
pub use stack::StackOutputStore;

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

use crate::config::Website;
use crate::types::{BucketName, DistributionId, DomainName, SiteName};

/// The outputs a website's provisioning step publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputName {
    BucketName,
    Domain,
    CName,
    DistributionId,
}

impl OutputName {
    fn suffix(&self) -> &'static str {
        match self {
            OutputName::BucketName => "BucketName",
            OutputName::Domain => "Domain",
            OutputName::CName => "CName",
            OutputName::DistributionId => "DistributionId",
        }
    }

    /// Key under which the output is stored, e.g. `landingPageBucketName`.
    pub fn key(&self, site: &SiteName) -> String {
        format!("{}{}", site.camel_case(), self.suffix())
    }
}

impl fmt::Display for OutputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputName::BucketName => write!(f, "bucket name"),
            OutputName::Domain => write!(f, "domain"),
            OutputName::CName => write!(f, "CNAME"),
            OutputName::DistributionId => write!(f, "distribution id"),
        }
    }
}

/// Read-only access to persisted outputs.
#[async_trait]
pub trait OutputStore: Send + Sync {
    /// Value stored under `key`, or `None` if it has not been published.
    async fn get(&self, key: &str) -> Result<Option<String>, OutputError>;
}

#[async_trait]
impl<T: OutputStore + ?Sized> OutputStore for Box<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, OutputError> {
        (**self).get(key).await
    }
}

/// Errors reading the output store. Absence is not an error.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to read outputs file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("outputs file {path} is not a JSON object: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read outputs of stack '{stack}': {message}")]
    Stack { stack: String, message: String },
}

/// All four outputs, resolved together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub bucket_name: Option<BucketName>,
    pub domain: Option<String>,
    pub cname: Option<String>,
    pub distribution_id: Option<DistributionId>,
}

impl ResolvedOutputs {
    /// Public URL of the site, if a domain is known.
    pub fn url(&self) -> Option<String> {
        self.domain.as_ref().map(|d| format!("https://{d}"))
    }
}

/// Resolves a website's outputs from a store. Every call reads the store
/// again, so later calls observe newer provisioning state.
pub struct OutputResolver<O> {
    store: O,
    site: SiteName,
    primary_domain: Option<DomainName>,
}

impl<O: OutputStore> OutputResolver<O> {
    pub fn new(store: O, website: &Website) -> Self {
        Self {
            store,
            site: website.site.clone(),
            primary_domain: website.primary_domain().cloned(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &O {
        &self.store
    }

    async fn lookup(&self, name: OutputName) -> Result<Option<String>, OutputError> {
        let key = name.key(&self.site);
        let value = self.store.get(&key).await?.filter(|v| !v.is_empty());
        if value.is_none() {
            tracing::debug!("Output {} is not resolved", key);
        }
        Ok(value)
    }

    pub async fn bucket_name(&self) -> Result<Option<BucketName>, OutputError> {
        Ok(self.lookup(OutputName::BucketName).await?.map(BucketName::new))
    }

    /// The first configured domain, else the CDN's generated domain.
    pub async fn domain(&self) -> Result<Option<String>, OutputError> {
        if let Some(domain) = &self.primary_domain {
            return Ok(Some(domain.to_string()));
        }
        self.lookup(OutputName::Domain).await
    }

    pub async fn cname(&self) -> Result<Option<String>, OutputError> {
        self.lookup(OutputName::CName).await
    }

    pub async fn distribution_id(&self) -> Result<Option<DistributionId>, OutputError> {
        Ok(self
            .lookup(OutputName::DistributionId)
            .await?
            .map(DistributionId::new))
    }

    /// Resolve all four outputs concurrently.
    pub async fn resolve_all(&self) -> Result<ResolvedOutputs, OutputError> {
        let (bucket_name, domain, cname, distribution_id) = tokio::try_join!(
            self.bucket_name(),
            self.domain(),
            self.cname(),
            self.distribution_id()
        )?;

        Ok(ResolvedOutputs {
            bucket_name,
            domain,
            cname,
            distribution_id,
        })
    }
}
