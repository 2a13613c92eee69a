//! Data models for ompcli.
//!
//! - [`ProjectConfig`]: build configuration from `project.json`
//! - [`ServerConfig`]: server configuration from `config.json`
//! - [`BuildResult`]: classified compiler output for one build
//!
//! None of these are shared between command invocations; the JSON files on disk
//! are the only persistent state and are re-read by every command.

pub mod build_result;
pub mod config;

pub use build_result::BuildResult;
pub use config::{ProjectConfig, ServerConfig};
