// ABOUTME: Remove command implementation.
// ABOUTME: Empties the website bucket so the infrastructure can be destroyed.

use super::context;
use skiff::diagnostics::Diagnostics;
use skiff::error::Result;
use skiff::output::Output;
use std::path::Path;

pub async fn remove(config_path: Option<&Path>, mut output: Output) -> Result<()> {
    output.start_timer();
    let (config, website) = context::load(config_path)?;
    output.progress(&format!("Emptying bucket of site '{}'", website.site));

    let deployer = context::connect(&config, website).await;
    let mut diagnostics = Diagnostics::default();
    let outcome = deployer.pre_remove(&mut diagnostics).await?;

    context::print_warnings(&output, &diagnostics);
    let message = match &outcome.bucket {
        Some(bucket) => format!("Removed {} object(s) from {}", outcome.deleted, bucket),
        None => "Nothing to remove".to_string(),
    };
    output.report(&message, Some(&outcome));
    Ok(())
}
