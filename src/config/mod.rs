//! Project and server configuration resolution.
//!
//! Both descriptors follow the same lifecycle: parse the JSON file if it exists,
//! otherwise fall back to inferred or built-in values. An existing descriptor is
//! trusted as complete and never merged with defaults.
//!
//! Project resolution is an ordered chain of strategies, each returning a value
//! or "not applicable" (`None`). The first applicable result wins:
//!
//! 1. `project.json` in the project root
//! 2. first `gamemodes/*.pwn` (lexical order)
//! 3. first `*.pwn` in the root (legacy layout)
//! 4. built-in defaults

pub mod defaults;

use crate::models::{ProjectConfig, ServerConfig};
use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use std::fs;
use thiserror::Error;

pub use defaults::{default_project_config, default_server_config};

/// Project descriptor file name
pub const PROJECT_DESCRIPTOR: &str = "project.json";

/// Server descriptor file name (also the staged name inside the build directory)
pub const SERVER_DESCRIPTOR: &str = "config.json";

/// Conventional directory for gamemode sources and compiled artifacts
pub const GAMEMODES_DIR: &str = "gamemodes";

pub const SOURCE_EXTENSION: &str = "pwn";
pub const ARTIFACT_EXTENSION: &str = "amx";

/// Errors raised while resolving configuration.
///
/// A missing descriptor is never an error; only unreadable or malformed ones are.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One step of a fallback chain
pub type Strategy<T> = fn(&Utf8Path) -> Result<Option<T>, ConfigError>;

/// Project strategies, in priority order. Defaults are applied after the chain.
pub const PROJECT_STRATEGIES: &[(&str, Strategy<ProjectConfig>)] = &[
    ("descriptor", project_from_descriptor),
    ("gamemodes source", project_from_gamemodes_source),
    ("root source", project_from_root_source),
];

pub const SERVER_STRATEGIES: &[(&str, Strategy<ServerConfig>)] =
    &[("descriptor", server_from_descriptor)];

/// Resolves configuration for a project rooted at a directory.
///
/// Stateless apart from the root path: every call re-reads the disk.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    root: Utf8PathBuf,
}

impl ConfigResolver {
    pub fn new<P: AsRef<Utf8Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve the project configuration.
    ///
    /// # Errors
    /// Fails only if `project.json` exists but cannot be read or parsed.
    pub fn resolve_project(&self) -> Result<ProjectConfig, ConfigError> {
        let config = run_chain(PROJECT_STRATEGIES, &self.root)?
            .unwrap_or_else(default_project_config);
        tracing::debug!(
            "Resolved project '{}': main={}, output={}",
            config.name,
            config.main_file,
            config.output_file
        );
        Ok(config)
    }

    /// Resolve the server configuration.
    ///
    /// # Errors
    /// Fails only if `config.json` exists but cannot be read or parsed.
    pub fn resolve_server(&self) -> Result<ServerConfig, ConfigError> {
        Ok(run_chain(SERVER_STRATEGIES, &self.root)?.unwrap_or_else(default_server_config))
    }

    /// Check whether the root looks like an open.mp project.
    ///
    /// True if either descriptor exists or any `.pwn` source is found in
    /// `gamemodes/` or (legacy) the root itself.
    pub fn is_project(&self) -> bool {
        self.root.join(PROJECT_DESCRIPTOR).exists()
            || self.root.join(SERVER_DESCRIPTOR).exists()
            || !find_sources(&self.root.join(GAMEMODES_DIR)).is_empty()
            || !find_sources(&self.root).is_empty()
    }
}

fn run_chain<T>(
    strategies: &[(&str, Strategy<T>)],
    root: &Utf8Path,
) -> Result<Option<T>, ConfigError> {
    for (name, strategy) in strategies {
        if let Some(value) = strategy(root)? {
            tracing::debug!("Configuration resolved by {} strategy", name);
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Read and parse a JSON descriptor if it exists.
pub fn read_descriptor<T: DeserializeOwned>(path: &Utf8Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Loaded {}", path);
    Ok(Some(value))
}

pub fn project_from_descriptor(root: &Utf8Path) -> Result<Option<ProjectConfig>, ConfigError> {
    read_descriptor(&root.join(PROJECT_DESCRIPTOR))
}

pub fn server_from_descriptor(root: &Utf8Path) -> Result<Option<ServerConfig>, ConfigError> {
    read_descriptor(&root.join(SERVER_DESCRIPTOR))
}

pub fn project_from_gamemodes_source(
    root: &Utf8Path,
) -> Result<Option<ProjectConfig>, ConfigError> {
    Ok(infer_from_sources(root, &root.join(GAMEMODES_DIR)))
}

pub fn project_from_root_source(root: &Utf8Path) -> Result<Option<ProjectConfig>, ConfigError> {
    Ok(infer_from_sources(root, root))
}

fn infer_from_sources(root: &Utf8Path, dir: &Utf8Path) -> Option<ProjectConfig> {
    let source = find_sources(dir).into_iter().next()?;
    let stem = source.file_stem()?.to_string();
    let main_file = source
        .strip_prefix(root)
        .map(Utf8Path::to_path_buf)
        .unwrap_or_else(|_| source.clone());

    tracing::info!("No {} found, inferred project from {}", PROJECT_DESCRIPTOR, main_file);

    Some(ProjectConfig {
        output_file: artifact_path(&stem).into_string(),
        main_file: main_file.into_string(),
        name: stem,
        ..default_project_config()
    })
}

/// `gamemodes/<stem>.amx`
pub fn artifact_path(stem: &str) -> Utf8PathBuf {
    Utf8Path::new(GAMEMODES_DIR).join(format!("{stem}.{ARTIFACT_EXTENSION}"))
}

/// `gamemodes/<stem>.pwn`
pub fn source_path(stem: &str) -> Utf8PathBuf {
    Utf8Path::new(GAMEMODES_DIR).join(format!("{stem}.{SOURCE_EXTENSION}"))
}

/// List `.pwn` files directly inside `dir`, sorted lexically.
///
/// A missing directory or an unusable pattern yields an empty list.
pub fn find_sources(dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(dir.as_str()),
        SOURCE_EXTENSION
    );

    let paths = match glob::glob(&pattern) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::warn!("Invalid source pattern {}: {}", pattern, e);
            return Vec::new();
        }
    };

    let mut sources: Vec<Utf8PathBuf> = paths
        .filter_map(Result::ok)
        .filter_map(|path| Utf8PathBuf::from_path_buf(path).ok())
        .filter(|path| path.is_file())
        .collect();
    sources.sort();
    sources
}
