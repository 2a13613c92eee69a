use crate::settings::Settings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Prefix for rotated log files (`ompcli.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "ompcli";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Setup logging for one CLI invocation.
///
/// Console logs always go to stderr so they never mix with compiler or server
/// output on stdout. When `log_dir` is configured, a daily rotating file log is
/// added as well.
///
/// # Arguments
/// * `settings` - Tool settings (level, optional log directory, JSON switch)
/// * `root` - Project root; a relative `log_dir` is resolved against it
///
/// # Returns
/// The file appender guard, if file logging is enabled. It must be held for the
/// duration of the program to keep the file log flushed.
pub fn setup_logging(settings: &Settings, root: &Utf8Path) -> Result<Option<WorkerGuard>> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_level)
            .with_context(|| format!("Invalid log level: {}", settings.log_level))?,
    };

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if settings.json_logs {
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed(),
        );
    } else {
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .boxed(),
        );
    }

    let guard = match &settings.log_dir {
        Some(dir) => {
            let log_path = resolve_log_dir(root, dir);
            create_log_dir(&log_path)?;

            let file_appender = rolling::daily(&log_path, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            layers.push(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false) // No ANSI codes in log files
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .boxed(),
            );
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .context("Failed to initialize logging")?;

    tracing::debug!(
        "Logging initialized: level={}, dir={:?}, json={}",
        settings.log_level,
        settings.log_dir,
        settings.json_logs
    );

    Ok(guard)
}

fn resolve_log_dir(root: &Utf8Path, dir: &str) -> Utf8PathBuf {
    let dir = Utf8Path::new(dir);
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        root.join(dir)
    }
}

fn create_log_dir(log_path: &Utf8Path) -> Result<()> {
    if !log_path.exists() {
        fs::create_dir_all(log_path)
            .with_context(|| format!("Failed to create log directory: {}", log_path))?;
    }
    Ok(())
}
