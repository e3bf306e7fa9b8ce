// ABOUTME: Upload and deploy command implementations.
// ABOUTME: Syncs the site directory, invalidates the CDN, and reports the URL.

use super::context;
use serde_json::json;
use skiff::diagnostics::Diagnostics;
use skiff::error::Result;
use skiff::output::Output;
use std::path::Path;

/// On-demand upload with progress output.
pub async fn upload(config_path: Option<&Path>, mut output: Output) -> Result<()> {
    output.start_timer();
    let (config, website) = context::load(config_path)?;
    output.progress(&format!("Uploading site '{}'", website.site));

    let deployer = context::connect(&config, website).await;
    let mut diagnostics = Diagnostics::default();
    let outcome = deployer.upload(&output, &mut diagnostics).await?;

    context::print_warnings(&output, &diagnostics);
    output.report(&outcome.summary(), Some(&outcome));
    Ok(())
}

/// Upload run right after provisioning; prints only the result.
pub async fn deploy(config_path: Option<&Path>, mut output: Output) -> Result<()> {
    output.start_timer();
    let (config, website) = context::load(config_path)?;

    let deployer = context::connect(&config, website).await;
    let mut diagnostics = Diagnostics::default();
    let outcome = deployer.post_deploy_upload(&mut diagnostics).await?;

    context::print_warnings(&output, &diagnostics);
    output.report(&outcome.summary(), Some(&outcome));
    Ok(())
}

/// `upload --dry-run`: list the changes an upload would make.
pub async fn plan(config_path: Option<&Path>, output: Output) -> Result<()> {
    let (config, website) = context::load(config_path)?;
    let deployer = context::connect(&config, website).await;
    let plan = deployer.plan_upload().await?;

    for file in &plan.uploads {
        output.progress(&format!("  upload  {}", file.key));
    }
    for key in &plan.deletes {
        output.progress(&format!("  delete  {key}"));
    }

    let uploads: Vec<&str> = plan.uploads.iter().map(|f| f.key.as_str()).collect();
    let data = json!({
        "uploads": uploads,
        "deletes": plan.deletes,
        "unchanged": plan.unchanged,
    });
    output.report(
        &format!(
            "{} file(s) would change ({} upload, {} delete), {} unchanged",
            plan.file_change_count(),
            plan.uploads.len(),
            plan.deletes.len(),
            plan.unchanged
        ),
        Some(&data),
    );
    Ok(())
}
