// ompcli - project lifecycle CLI for open.mp gamemodes
//
// This is the library crate containing configuration resolution, the build
// pipeline and the server launcher. The binary crate (main.rs) provides the
// command-line entry point.

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use config::{ConfigError, ConfigResolver};
pub use models::{BuildResult, ProjectConfig, ServerConfig};
pub use services::{BuildError, OutputClassifier, RunError, ScaffoldError, StageError};
pub use settings::Settings;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
