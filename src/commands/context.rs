// ABOUTME: Shared setup for commands: configuration loading and AWS wiring.
// ABOUTME: Builds a Deployer backed by S3, CloudFront, and the configured output store.

use aws_config::SdkConfig;
use skiff::aws::load_sdk_config;
use skiff::cdn::CloudFrontCdn;
use skiff::config::{Config, OutputsConfig, Website};
use skiff::deploy::Deployer;
use skiff::diagnostics::Diagnostics;
use skiff::error::Result;
use skiff::output::Output;
use skiff::outputs::{FileOutputStore, OutputStore, StackOutputStore};
use skiff::storage::S3Store;
use skiff::sync::SyncOptions;
use std::env;
use std::path::Path;

pub type AwsDeployer = Deployer<S3Store, CloudFrontCdn, Box<dyn OutputStore>>;

/// Load the configuration (explicit path or discovered) and validate it.
pub fn load(config_path: Option<&Path>) -> Result<(Config, Website)> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::discover(&env::current_dir()?)?,
    };
    let website = config.validate()?;
    tracing::debug!("Loaded configuration for site '{}'", website.site);
    Ok((config, website))
}

pub async fn connect(config: &Config, website: Website) -> AwsDeployer {
    let sdk_config = load_sdk_config(&config.aws).await;
    Deployer::new(
        website,
        S3Store::new(&sdk_config),
        CloudFrontCdn::new(&sdk_config),
        output_store_with(config, &sdk_config),
        SyncOptions::from(&config.sync),
    )
}

/// The output store named by the configuration. AWS settings are only
/// loaded when the outputs live in a stack.
pub async fn output_store(config: &Config) -> Box<dyn OutputStore> {
    match &config.outputs {
        OutputsConfig::File { file } => Box::new(FileOutputStore::new(file.clone())),
        OutputsConfig::Stack { .. } => {
            let sdk_config = load_sdk_config(&config.aws).await;
            output_store_with(config, &sdk_config)
        }
    }
}

fn output_store_with(config: &Config, sdk_config: &SdkConfig) -> Box<dyn OutputStore> {
    match &config.outputs {
        OutputsConfig::File { file } => Box::new(FileOutputStore::new(file.clone())),
        OutputsConfig::Stack { stack } => Box::new(StackOutputStore::new(sdk_config, stack.clone())),
    }
}

pub fn print_warnings(output: &Output, diagnostics: &Diagnostics) {
    for warning in diagnostics.warnings() {
        output.warning(&warning.message);
    }
}
