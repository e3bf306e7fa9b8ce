// ABOUTME: Configuration types and parsing for skiff.yml.
// ABOUTME: Handles YAML parsing, path resolution, and validation into a Website.

mod deserialize;
mod env_value;
mod error;
mod init;
mod website;

pub use env_value::EnvValue;
pub use error::ConfigError;
pub use init::init_config;
pub use website::{CustomDomain, Website};

use crate::error::{Error, Result};
use crate::types::SiteName;
use deserialize::{deserialize_domains, deserialize_site_name};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "skiff.yml";
pub const CONFIG_FILENAME_ALT: &str = "skiff.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".skiff/config.yml";

/// Default location of the outputs file written by the provisioning step.
pub const DEFAULT_OUTPUTS_FILE: &str = ".skiff/outputs.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_site_name")]
    pub site: SiteName,

    pub path: PathBuf,

    #[serde(default, deserialize_with = "deserialize_domains")]
    pub domain: Vec<String>,

    #[serde(default)]
    pub certificate: Option<EnvValue>,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub error_page: Option<String>,

    #[serde(default)]
    pub redirect_to_main_domain: bool,

    #[serde(default)]
    pub outputs: OutputsConfig,

    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub allow_iframe: bool,
}

/// Where provisioning published its outputs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OutputsConfig {
    /// A JSON object of output key to value.
    File { file: PathBuf },
    /// The outputs of a CloudFormation stack.
    Stack { stack: String },
}

impl Default for OutputsConfig {
    fn default() -> Self {
        OutputsConfig::File {
            file: PathBuf::from(DEFAULT_OUTPUTS_FILE),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AwsConfig {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_retries")]
    pub retries: u32,

    #[serde(default = "default_backoff", with = "humantime_serde")]
    pub backoff: Duration,
}

fn default_concurrency() -> usize {
    8
}

fn default_retries() -> u32 {
    3
}

fn default_backoff() -> Duration {
    Duration::from_millis(200)
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            concurrency: default_concurrency(),
            retries: default_retries(),
            backoff: default_backoff(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    /// Load a config file, resolving relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::load_with_base(path, base)
    }

    /// Find the config file in `dir`, resolving relative paths against `dir`.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load_with_base(path, dir);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    fn load_with_base(path: &Path, base: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;
        config.resolve_paths(base);
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        if self.path.is_relative() {
            self.path = base.join(&self.path);
        }
        if let OutputsConfig::File { file } = &mut self.outputs
            && file.is_relative()
        {
            *file = base.join(&*file);
        }
    }

    /// Validate and normalize into a [`Website`].
    ///
    /// Checks, in order: a domain requires a certificate; the error page
    /// must not be a relative path token. Domains are then parsed as
    /// hostnames and sync settings are range-checked.
    pub fn validate(&self) -> std::result::Result<Website, ConfigError> {
        if !self.domain.is_empty() && self.certificate.is_none() {
            return Err(ConfigError::DomainWithoutCertificate);
        }

        if let Some(page) = &self.error_page
            && (page.starts_with("./") || page.starts_with("../"))
        {
            return Err(ConfigError::RelativeErrorPage(page.clone()));
        }

        if self.sync.concurrency == 0 {
            return Err(ConfigError::InvalidSync(
                "concurrency must be at least 1".to_string(),
            ));
        }

        let custom_domain = match &self.certificate {
            Some(certificate) if !self.domain.is_empty() => Some(CustomDomain::parse(
                &self.domain,
                certificate.resolve()?,
            )?),
            _ => None,
        };

        Ok(Website {
            site: self.site.clone(),
            path: self.path.clone(),
            custom_domain,
            allow_iframe: self.security.allow_iframe,
            error_page: self.error_page.clone(),
            redirect_to_main_domain: self.redirect_to_main_domain,
        })
    }
}
