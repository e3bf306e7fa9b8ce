// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skiff")]
#[command(about = "Static website deployment to S3 and CloudFront")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print results as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the configuration file (default: discover skiff.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new skiff.yml configuration file
    Init {
        /// Site name (defaults to the directory name)
        #[arg(short, long)]
        site: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Upload the website to its bucket and invalidate the CDN cache
    Upload {
        /// Show what would change without uploading or deleting anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Upload after provisioning, reporting only the final result
    Deploy,

    /// Empty the website bucket before the infrastructure is removed
    Remove,

    /// Show the provisioned bucket, distribution, and URL
    Info,

    /// Render the edge functions for the distribution
    Functions {
        /// Write each function to <out>/<name>.js instead of printing JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
