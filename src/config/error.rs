// ABOUTME: Configuration validation errors.
// ABOUTME: Raised before any network interaction and never retried.

use crate::types::DomainNameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "a domain is configured but no certificate: set 'certificate' to a certificate covering the domain"
    )]
    DomainWithoutCertificate,

    #[error(
        "error_page '{0}' cannot start with './' or '../' (it must be relative to the bucket root)"
    )]
    RelativeErrorPage(String),

    #[error("invalid domain '{domain}': {source}")]
    InvalidDomain {
        domain: String,
        #[source]
        source: DomainNameError,
    },

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid sync settings: {0}")]
    InvalidSync(String),
}
