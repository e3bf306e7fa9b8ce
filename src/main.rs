// ABOUTME: Entry point for the skiff CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use skiff::config;
use skiff::error::Result;
use skiff::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG overrides the verbose flag
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(OutputMode::from_flags(cli.quiet, cli.json));

    if let Err(e) = run(cli).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output = Output::new(OutputMode::from_flags(cli.quiet, cli.json));
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init { site, force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, site.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Upload { dry_run: true } => commands::plan(config_path, output).await,
        Commands::Upload { dry_run: false } => commands::upload(config_path, output).await,
        Commands::Deploy => commands::deploy(config_path, output).await,
        Commands::Remove => commands::remove(config_path, output).await,
        Commands::Info => commands::info(config_path, output).await,
        Commands::Functions { out } => commands::functions(config_path, out.as_deref(), output),
    }
}
