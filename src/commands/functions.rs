// ABOUTME: Functions command implementation.
// ABOUTME: Renders the generated edge functions as JSON or as .js files.

use super::context;
use skiff::edge::EdgeFunctions;
use skiff::error::Result;
use skiff::output::Output;
use std::fs;
use std::path::Path;

pub fn functions(config_path: Option<&Path>, out: Option<&Path>, output: Output) -> Result<()> {
    let (_, website) = context::load(config_path)?;
    let functions = EdgeFunctions::build(&website);

    let Some(dir) = out else {
        println!("{}", serde_json::to_string_pretty(&functions)?);
        return Ok(());
    };

    fs::create_dir_all(dir)?;
    let mut written = 0;
    for function in functions.iter() {
        let path = dir.join(format!("{}.js", function.name));
        fs::write(&path, &function.code)?;
        output.progress(&format!("  {} ({})", path.display(), function.event_type));
        written += 1;
    }

    output.success(&format!("Wrote {written} function(s) to {}", dir.display()));
    Ok(())
}
