use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::Deserialize;

/// Settings file stem; any format the `config` crate knows is accepted
/// (`ompcli.toml`, `ompcli.yaml`, `ompcli.json`, ...).
pub const SETTINGS_FILE_STEM: &str = "ompcli";

/// Environment variable prefix, e.g. `OMPCLI_LOG_LEVEL=debug`
pub const ENV_PREFIX: &str = "OMPCLI";

/// Tool settings for the CLI itself.
///
/// These never describe the project; `project.json` and `config.json` are
/// handled by [`ConfigResolver`](crate::config::ConfigResolver).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default tracing filter; `RUST_LOG` still wins when set
    pub log_level: String,

    /// Directory for daily-rotated log files; no file logging when unset
    pub log_dir: Option<String>,

    /// Emit console logs as JSON lines
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_dir: None,
            json_logs: false,
        }
    }
}

impl Settings {
    /// Load settings for a project root.
    ///
    /// Layers, lowest priority first: defaults, `<root>/ompcli.*`, `OMPCLI_*`
    /// environment variables. A missing settings file is fine.
    pub fn load(root: &Utf8Path) -> Result<Self> {
        let file_stem = root.join(SETTINGS_FILE_STEM);

        let settings = config::Config::builder()
            .add_source(config::File::with_name(file_stem.as_str()).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("Failed to load settings from {}", root))?;

        settings
            .try_deserialize()
            .context("Failed to deserialize ompcli settings")
    }
}
