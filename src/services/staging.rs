//! Copies configuration, resources and plugins into the build directory.
//!
//! Layout produced:
//!
//! ```text
//! build/
//! ├── config.json        staged server descriptor
//! ├── gamemodes/
//! ├── <resource files>   flattened by base name
//! └── plugins/
//!     └── <plugin files> flattened by base name
//! ```
//!
//! Declared resources and plugins that do not exist are skipped. Copying is not
//! transactional: on failure, files copied so far stay in place.

use crate::config::{ConfigError, ConfigResolver, GAMEMODES_DIR, SERVER_DESCRIPTOR};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;

/// Plugin subdirectory inside the build directory
pub const PLUGINS_DIR: &str = "plugins";

#[derive(Error, Debug)]
pub enum StageError {
    #[error("failed to get project configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: Utf8PathBuf,
        to: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("declared path has no file name: {0}")]
    NoFileName(String),
}

/// Create a directory and its parents; an existing directory is fine.
pub fn ensure_dir(path: &Utf8Path) -> Result<(), StageError> {
    fs::create_dir_all(path).map_err(|source| StageError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Stage the project's files into `build_dir`.
///
/// # Returns
/// The destination paths written, in copy order.
pub fn stage(root: &Utf8Path, build_dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, StageError> {
    let config = ConfigResolver::new(root).resolve_project()?;
    let mut staged = Vec::new();

    let descriptor = root.join(SERVER_DESCRIPTOR);
    let server_source = if descriptor.exists() {
        Some(descriptor)
    } else if !config.server_cfg.is_empty() && root.join(&config.server_cfg).exists() {
        Some(root.join(&config.server_cfg))
    } else {
        tracing::warn!("No server descriptor to stage");
        None
    };

    if let Some(source) = server_source {
        staged.push(copy_file(&source, &build_dir.join(SERVER_DESCRIPTOR))?);
    }

    ensure_dir(&build_dir.join(GAMEMODES_DIR))?;

    for resource in &config.resources {
        if let Some(dest) = copy_if_exists(root, resource, build_dir)? {
            staged.push(dest);
        }
    }

    let plugins_dir = build_dir.join(PLUGINS_DIR);
    ensure_dir(&plugins_dir)?;

    for plugin in &config.plugins {
        if let Some(dest) = copy_if_exists(root, plugin, &plugins_dir)? {
            staged.push(dest);
        }
    }

    tracing::info!("Staged {} files into {}", staged.len(), build_dir);
    Ok(staged)
}

fn copy_if_exists(
    root: &Utf8Path,
    declared: &str,
    dest_dir: &Utf8Path,
) -> Result<Option<Utf8PathBuf>, StageError> {
    let source = root.join(declared);
    if !source.exists() {
        tracing::warn!("Skipping missing file: {}", declared);
        return Ok(None);
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| StageError::NoFileName(declared.to_string()))?;

    copy_file(&source, &dest_dir.join(file_name)).map(Some)
}

fn copy_file(from: &Utf8Path, to: &Utf8Path) -> Result<Utf8PathBuf, StageError> {
    fs::copy(from, to).map_err(|source| StageError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    tracing::debug!("Copied {} -> {}", from, to);
    Ok(to.to_path_buf())
}
