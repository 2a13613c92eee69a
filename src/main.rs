//! ompcli - project lifecycle CLI for open.mp gamemodes
//!
//! Main entry point for the command-line tool.
//!
//! # Execution Flow
//!
//! 1. Parse the command line ([`Cli`])
//! 2. Load tool settings from `ompcli.*` / `OMPCLI_*` in the current directory
//! 3. Initialize logging (stderr, optional rotating file)
//! 4. Dispatch to `init`, `build` or `run` with the current directory as root
//! 5. Print results; any failure becomes `Error: ...` on stderr and exit status 1
//!
//! Everything runs on a single-threaded tokio runtime. The only waits are on the
//! child process (pawncc or omp-server).

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ompcli::cli::{Cli, Commands};
use ompcli::services::{
    BuildError, CompilerInvoker, InitOptions, LaunchOptions, created_label, init_project,
    launcher,
};
use ompcli::{APP_NAME, BuildResult, Settings, VERSION};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let root = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow!("Current directory is not valid UTF-8: {}", p.display()))?;

    let mut settings = Settings::load(&root)?;
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }
    let _guard = ompcli::logging::setup_logging(&settings, &root)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    match cli.command {
        Commands::Init {
            name,
            author,
            pawncc_path,
        } => init_command(
            &root,
            &InitOptions {
                name,
                author,
                pawncc_path,
            },
        ),
        Commands::Build { verbose } => build_command(&root, verbose).await,
        Commands::Run { debug, port } => {
            run_command(
                &root,
                LaunchOptions {
                    debug,
                    port: port.unwrap_or(0),
                },
            )
            .await
        }
    }
}

fn init_command(root: &Utf8Path, options: &InitOptions) -> Result<ExitCode> {
    let created = init_project(root, options).context("Error initializing project")?;

    println!("Project initialized successfully!");
    println!("Created files:");
    for path in &created {
        println!("- {}", created_label(root, path));
    }
    Ok(ExitCode::SUCCESS)
}

async fn build_command(root: &Utf8Path, verbose: bool) -> Result<ExitCode> {
    let invoker = CompilerInvoker::for_current_platform()?;
    let plan = invoker.plan(root).context("Error building project")?;

    if verbose {
        println!("Building open.mp project...");
        println!("Project name: {}", plan.project.name);
        println!("Project version: {}", plan.project.version);
        println!("Server hostname: {}", plan.server.hostname);
        if let Some(missing) = &plan.compiler_fallback {
            println!("Warning: pawncc not found at {}, trying to find in PATH", missing);
        }
        println!("Using pawncc from: {}", plan.compiler);
        println!("Main file: {}", plan.project.main_file);
        println!("Output file: {}", plan.project.output_file);
    }

    match invoker.compile_and_stage(&plan, verbose).await {
        Ok(result) => {
            print_build_report(&result, verbose);
            println!("Project built successfully!");
            Ok(ExitCode::SUCCESS)
        }
        Err(BuildError::CompilationFailed(result)) => {
            print_build_report(&result, verbose);
            Err(BuildError::CompilationFailed(result)).context("Error building project")
        }
        Err(e) => Err(e).context("Error building project"),
    }
}

/// Print the summary, plus the classified lines unless they were already
/// streamed in verbose mode.
fn print_build_report(result: &BuildResult, verbose: bool) {
    println!("\n{}", result.summary());

    if verbose {
        return;
    }

    if !result.errors().is_empty() {
        println!("\nErrors:");
        for line in result.errors() {
            println!("  - {}", line);
        }
    }

    if !result.warnings().is_empty() {
        println!("\nWarnings:");
        for line in result.warnings() {
            println!("  - {}", line);
        }
    }
}

async fn run_command(root: &Utf8Path, options: LaunchOptions) -> Result<ExitCode> {
    let plan = launcher::plan_for_current_platform(root, options)
        .context("Error running project")?;

    println!("Starting open.mp server on port {}...", plan.effective_port);
    if plan.debug {
        println!("Debug mode enabled");
    }
    println!("Using gamemode: {}", plan.gamemode);

    let status = launcher::execute(&plan)
        .await
        .context("Error running project")?;

    if status.success() {
        return Ok(ExitCode::SUCCESS);
    }

    tracing::warn!("Server exited with {}", status);
    Ok(status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .map(ExitCode::from)
        .unwrap_or(ExitCode::FAILURE))
}
