use crate::config::{ConfigError, ConfigResolver, GAMEMODES_DIR};
use crate::models::{ProjectConfig, ServerConfig};
use crate::services::compiler::BUILD_DIR;
use crate::services::platform::{Platform, SERVER_STEM};
use camino::{Utf8Path, Utf8PathBuf};
use std::process::ExitStatus;
use thiserror::Error;
use tokio::process::Command;

/// Errors that can occur before or while running the server
#[derive(Error, Debug)]
pub enum RunError {
    #[error("current directory is not an open.mp project")]
    NotAProject,

    #[error("project is not built. Please run 'ompcli build' first")]
    NotBuilt,

    #[error("failed to get configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("unsupported operating system: {0}")]
    UnsupportedPlatform(String),

    #[error("server executable not found at {0}")]
    ServerNotFound(Utf8PathBuf),

    #[error("compiled gamemode not found at {0}. Please run 'ompcli build' first")]
    GamemodeNotFound(Utf8PathBuf),

    #[error("failed to launch server at {path}: {source}")]
    Launch {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Command-line overrides for `run`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub debug: bool,

    /// 0 means "use the port from config.json"
    pub port: u16,
}

/// Server arguments derived from configuration and overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerArgs {
    pub args: Vec<String>,

    /// Port the server will listen on, for reporting
    pub effective_port: i64,
}

/// Fully resolved server invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: Utf8PathBuf,
    pub args: Vec<String>,
    pub working_dir: Utf8PathBuf,
    pub effective_port: i64,
    pub debug: bool,

    /// Compiled artifact file name, for reporting
    pub gamemode: String,
}

/// Derive server flags, in order: `--debug`, `--port=<n>`, `--gamemode=<path>`.
///
/// The port flag is added only for a non-zero override that differs from the
/// configured port. The gamemode flag is added only when config.json leaves
/// `gamemode` empty; otherwise the server picks its own.
pub fn derive_args(
    project: &ProjectConfig,
    server: &ServerConfig,
    options: LaunchOptions,
) -> ServerArgs {
    let mut args = Vec::new();

    if options.debug {
        args.push("--debug".to_string());
    }

    let effective_port = if options.port != 0 && i64::from(options.port) != server.port {
        args.push(format!("--port={}", options.port));
        i64::from(options.port)
    } else {
        server.port
    };

    if server.gamemode.is_empty() {
        let relative = Utf8Path::new(GAMEMODES_DIR).join(project.output_file_name());
        args.push(format!("--gamemode={}", relative));
    }

    ServerArgs {
        args,
        effective_port,
    }
}

/// Resolve everything needed to start the server, checking preconditions.
///
/// Checks run in order: project, build directory, configuration, server
/// executable, compiled gamemode. Nothing is spawned here.
pub fn plan_launch(
    root: &Utf8Path,
    options: LaunchOptions,
    platform: Platform,
) -> Result<LaunchPlan, RunError> {
    let resolver = ConfigResolver::new(root);
    if !resolver.is_project() {
        return Err(RunError::NotAProject);
    }

    let build_dir = root.join(BUILD_DIR);
    if !build_dir.exists() {
        return Err(RunError::NotBuilt);
    }

    let project = resolver.resolve_project()?;
    let server = resolver.resolve_server()?;

    let program = platform.executable_in(&build_dir, SERVER_STEM);
    if !program.exists() {
        return Err(RunError::ServerNotFound(program));
    }

    let gamemode_path = build_dir.join(&project.output_file);
    if !gamemode_path.exists() {
        return Err(RunError::GamemodeNotFound(gamemode_path));
    }

    let ServerArgs {
        args,
        effective_port,
    } = derive_args(&project, &server, options);

    tracing::debug!("Server command: {} {:?}", program, args);

    Ok(LaunchPlan {
        program,
        args,
        working_dir: build_dir,
        effective_port,
        debug: options.debug,
        gamemode: project.output_file_name().to_string(),
    })
}

/// Run the server in the foreground with inherited stdio and wait for it.
pub async fn execute(plan: &LaunchPlan) -> Result<ExitStatus, RunError> {
    tracing::info!("Starting {} in {}", plan.program, plan.working_dir);

    let status = Command::new(&plan.program)
        .args(&plan.args)
        .current_dir(&plan.working_dir)
        .status()
        .await
        .map_err(|source| RunError::Launch {
            path: plan.program.clone(),
            source,
        })?;

    tracing::info!("Server exited with {}", status);
    Ok(status)
}

/// Plan for the host platform
pub fn plan_for_current_platform(
    root: &Utf8Path,
    options: LaunchOptions,
) -> Result<LaunchPlan, RunError> {
    let platform = Platform::current()
        .ok_or_else(|| RunError::UnsupportedPlatform(std::env::consts::OS.to_string()))?;
    plan_launch(root, options, platform)
}
