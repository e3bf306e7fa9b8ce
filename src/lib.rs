// ABOUTME: Library root for skiff - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod aws;
pub mod cdn;
pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod edge;
pub mod error;
pub mod output;
pub mod outputs;
pub mod storage;
pub mod sync;
pub mod types;
