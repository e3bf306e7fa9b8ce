// ABOUTME: Validated, normalized website configuration.
// ABOUTME: A custom domain always carries its certificate once validated.

use nonempty::NonEmpty;
use std::path::PathBuf;

use super::ConfigError;
use crate::types::{DomainName, SiteName};

/// Website configuration after validation.
#[derive(Debug, Clone)]
pub struct Website {
    pub site: SiteName,
    pub path: PathBuf,
    pub custom_domain: Option<CustomDomain>,
    pub allow_iframe: bool,
    pub error_page: Option<String>,
    pub redirect_to_main_domain: bool,
}

/// One or more hostnames served under a single certificate.
/// The first domain is the main domain.
#[derive(Debug, Clone)]
pub struct CustomDomain {
    pub domains: NonEmpty<DomainName>,
    pub certificate: String,
}

impl CustomDomain {
    pub(super) fn parse(domains: &[String], certificate: String) -> Result<Self, ConfigError> {
        let parsed = domains
            .iter()
            .map(|d| {
                DomainName::new(d).map_err(|source| ConfigError::InvalidDomain {
                    domain: d.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let domains = NonEmpty::from_vec(parsed).ok_or(ConfigError::DomainWithoutCertificate)?;

        Ok(Self {
            domains,
            certificate,
        })
    }

    pub fn primary(&self) -> &DomainName {
        self.domains.first()
    }
}

impl Website {
    /// Configured domains in declaration order (empty without a custom domain).
    pub fn domains(&self) -> Vec<&DomainName> {
        self.custom_domain
            .as_ref()
            .map(|c| c.domains.iter().collect())
            .unwrap_or_default()
    }

    pub fn primary_domain(&self) -> Option<&DomainName> {
        self.custom_domain.as_ref().map(CustomDomain::primary)
    }

    pub fn certificate(&self) -> Option<&str> {
        self.custom_domain.as_ref().map(|c| c.certificate.as_str())
    }

    /// Error page as an absolute object path, as CDN error responses expect.
    pub fn error_page_path(&self) -> Option<String> {
        self.error_page
            .as_deref()
            .map(|page| format!("/{}", page.trim_start_matches('/')))
    }
}
