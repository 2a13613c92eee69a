//! Project scaffolding for `ompcli init`.
//!
//! Writes `project.json` and `config.json` with starter values and creates the
//! `gamemodes/` directory.

use crate::config::defaults::{
    DEFAULT_MAX_PLAYERS, DEFAULT_PAWNCC_PATH, DEFAULT_PORT, DEFAULT_PROJECT_NAME,
    DEFAULT_PROJECT_VERSION,
};
use crate::config::{
    GAMEMODES_DIR, PROJECT_DESCRIPTOR, SERVER_DESCRIPTOR, artifact_path, source_path,
};
use crate::models::{ProjectConfig, ServerConfig};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("{0} already exists")]
    AlreadyExists(Utf8PathBuf),

    #[error("failed to serialize {0}: {1}")]
    Serialize(&'static str, #[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Flags accepted by `init`; empty values fall back to defaults
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub name: Option<String>,
    pub author: Option<String>,
    pub pawncc_path: Option<String>,
}

/// Starter project descriptor
pub fn starter_project(name: &str, author: &str, pawncc_path: &str) -> ProjectConfig {
    ProjectConfig {
        name: name.to_string(),
        version: DEFAULT_PROJECT_VERSION.to_string(),
        main_file: source_path(name).into_string(),
        output_file: artifact_path(name).into_string(),
        resources: Vec::new(),
        plugins: Vec::new(),
        server_cfg: SERVER_DESCRIPTOR.to_string(),
        author: author.to_string(),
        repository: String::new(),
        pawncc_path: pawncc_path.to_string(),
    }
}

/// Starter server descriptor
pub fn starter_server(name: &str) -> ServerConfig {
    ServerConfig {
        hostname: format!("{name} Server"),
        port: DEFAULT_PORT,
        max_players: DEFAULT_MAX_PLAYERS,
        language: "English".to_string(),
        gamemode: name.to_string(),
        plugins: Vec::new(),
        web_url: "open.mp".to_string(),
        rcon_password: "changeme".to_string(),
        password: String::new(),
    }
}

/// Initialize a project in `root`.
///
/// # Errors
/// `AlreadyExists` if either descriptor is present; nothing is written then.
///
/// # Returns
/// Paths created, for reporting.
pub fn init_project(root: &Utf8Path, options: &InitOptions) -> Result<Vec<Utf8PathBuf>, ScaffoldError> {
    let project_path = root.join(PROJECT_DESCRIPTOR);
    let server_path = root.join(SERVER_DESCRIPTOR);

    for path in [&project_path, &server_path] {
        if path.exists() {
            return Err(ScaffoldError::AlreadyExists(path.clone()));
        }
    }

    let name = options
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .or_else(|| root.file_name().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
    let author = options.author.clone().unwrap_or_default();
    let pawncc_path = options
        .pawncc_path
        .clone()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PAWNCC_PATH.to_string());

    write_json(&project_path, PROJECT_DESCRIPTOR, &starter_project(&name, &author, &pawncc_path))?;
    write_json(&server_path, SERVER_DESCRIPTOR, &starter_server(&name))?;

    let mut created = vec![project_path, server_path];

    let gamemodes = root.join(GAMEMODES_DIR);
    match fs::create_dir_all(&gamemodes) {
        Ok(()) => created.push(gamemodes),
        Err(e) => tracing::warn!("Failed to create {} directory: {}", gamemodes, e),
    }

    tracing::info!("Initialized project '{}' in {}", name, root);
    Ok(created)
}

/// Console label for a created path: relative to `root`, with directories
/// shown as `gamemodes/ directory`.
pub fn created_label(root: &Utf8Path, path: &Utf8Path) -> String {
    let display = path.strip_prefix(root).unwrap_or(path);
    if path.is_dir() {
        format!("{display}/ directory")
    } else {
        display.to_string()
    }
}

fn write_json<T: Serialize>(
    path: &Utf8Path,
    label: &'static str,
    value: &T,
) -> Result<(), ScaffoldError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| ScaffoldError::Serialize(label, e))?;
    fs::write(path, json).map_err(|source| ScaffoldError::Write {
        path: path.to_path_buf(),
        source,
    })
}
