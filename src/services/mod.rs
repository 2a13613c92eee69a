//! Services module - the project lifecycle operations.
//!
//! The services know nothing about the command line; they take a project root
//! and explicit options and return typed results, so every operation can be
//! exercised against a temporary directory.
//!
//! # Components
//!
//! - [`compiler`]: the build pipeline. Plans the build (configuration,
//!   directories, compiler path), runs pawncc with captured or mirrored output,
//!   classifies the output and stages the build directory on success.
//! - [`classifier`]: [`OutputClassifier`], line-by-line error/warning detection.
//! - [`tee`]: fan-out writer used to capture and mirror child output.
//! - [`staging`]: copies the server descriptor, resources and plugins into `build/`.
//! - [`launcher`]: derives server flags and runs `omp-server` in the foreground.
//! - [`platform`]: executable naming per operating system.
//! - [`scaffold`]: `init`, writes starter descriptors.
//!
//! # Build flow
//!
//! ```text
//! ConfigResolver -> CompilerInvoker -> OutputClassifier -> (no errors) stage
//! ```
//!
//! `run` shares only the [`ConfigResolver`](crate::config::ConfigResolver).

pub mod classifier;
pub mod compiler;
pub mod launcher;
pub mod platform;
pub mod scaffold;
pub mod staging;
pub mod tee;

pub use classifier::OutputClassifier;
pub use compiler::{BUILD_DIR, BuildError, BuildPlan, CompilerInvoker, build};
pub use launcher::{LaunchOptions, LaunchPlan, RunError, derive_args, plan_launch};
pub use platform::Platform;
pub use scaffold::{InitOptions, ScaffoldError, created_label, init_project};
pub use staging::{StageError, stage};
