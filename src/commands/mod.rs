// ABOUTME: Command module aggregator for the skiff CLI.
// ABOUTME: Re-exports upload, deploy, remove, info, and functions handlers.

mod context;
mod functions;
mod info;
mod remove;
mod upload;

pub use functions::functions;
pub use info::info;
pub use remove::remove;
pub use upload::{deploy, plan, upload};
