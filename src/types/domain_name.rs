// ABOUTME: Validated hostname for custom website domains.
// ABOUTME: Enforces RFC 1123 label rules and normalizes to lowercase.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainNameError {
    #[error("domain name cannot be empty")]
    Empty,

    #[error("domain name exceeds maximum length of 253 characters")]
    TooLong,

    #[error("domain name '{0}' contains an empty label")]
    EmptyLabel(String),

    #[error("domain label '{0}' exceeds 63 characters")]
    LabelTooLong(String),

    #[error("domain label '{0}' cannot start or end with a hyphen")]
    HyphenAtEdge(String),

    #[error("invalid character in domain name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainName(String);

impl DomainName {
    pub fn new(value: &str) -> Result<Self, DomainNameError> {
        let trimmed = value.trim().trim_end_matches('.');
        if trimmed.is_empty() {
            return Err(DomainNameError::Empty);
        }

        if trimmed.len() > 253 {
            return Err(DomainNameError::TooLong);
        }

        let normalized = trimmed.to_ascii_lowercase();
        for label in normalized.split('.') {
            if label.is_empty() {
                return Err(DomainNameError::EmptyLabel(normalized.clone()));
            }
            if label.len() > 63 {
                return Err(DomainNameError::LabelTooLong(label.to_string()));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(DomainNameError::HyphenAtEdge(label.to_string()));
            }
            if let Some(c) = label
                .chars()
                .find(|c| !c.is_ascii_alphanumeric() && *c != '-')
            {
                return Err(DomainNameError::InvalidChar(c));
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
