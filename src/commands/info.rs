// ABOUTME: Info command implementation.
// ABOUTME: Resolves and prints the outputs published by provisioning.

use super::context;
use serde_json::json;
use skiff::error::Result;
use skiff::output::Output;
use skiff::outputs::OutputResolver;
use std::path::Path;

const NOT_PROVISIONED: &str = "(not provisioned)";

pub async fn info(config_path: Option<&Path>, output: Output) -> Result<()> {
    let (config, website) = context::load(config_path)?;
    let resolver = OutputResolver::new(context::output_store(&config).await, &website);
    let resolved = resolver.resolve_all().await?;

    let url = resolved.url();
    let bucket = resolved.bucket_name.as_ref().map(|b| b.as_str());
    let distribution = resolved.distribution_id.as_ref().map(|d| d.as_str());

    output.detail("Site", website.site.as_str());
    output.detail("URL", url.as_deref().unwrap_or(NOT_PROVISIONED));
    output.detail("CNAME", resolved.cname.as_deref().unwrap_or(NOT_PROVISIONED));
    output.detail("Bucket", bucket.unwrap_or(NOT_PROVISIONED));
    output.detail("Distribution", distribution.unwrap_or(NOT_PROVISIONED));

    let data = json!({
        "site": website.site.as_str(),
        "url": url,
        "domain": resolved.domain,
        "cname": resolved.cname,
        "bucket_name": bucket,
        "distribution_id": distribution,
    });
    let message = match &url {
        Some(url) => format!("Site '{}' is served at {url}", website.site),
        None => format!("Site '{}' is not provisioned yet", website.site),
    };
    output.report(&message, Some(&data));
    Ok(())
}
