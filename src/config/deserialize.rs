// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Handles site names and domains given as a single string or a list.

use serde::Deserialize;

use crate::types::SiteName;

pub fn deserialize_site_name<'de, D>(deserializer: D) -> Result<SiteName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    SiteName::new(&s).map_err(serde::de::Error::custom)
}

/// Accepts `domain: example.com` as well as `domain: [a.com, b.com]`.
pub fn deserialize_domains<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entry: Option<DomainEntry> = Option::deserialize(deserializer)?;
    Ok(match entry {
        None => Vec::new(),
        Some(DomainEntry::Single(domain)) => vec![domain],
        Some(DomainEntry::Many(domains)) => domains,
    })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DomainEntry {
    Single(String),
    Many(Vec<String>),
}
