use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::DEFAULT_LOG_FILTER;

static LOG_WORKER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub(crate) fn resolve_launcher_log_path(root_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    root_dir
        .unwrap_or_else(|| env::temp_dir().join("planalyze"))
        .join("logs")
        .join(file_name)
}

fn file_appender(log_path: &Path) -> Result<RollingFileAppender, String> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| format!("Invalid launcher log path: {}", log_path.display()))?;
    fs::create_dir_all(log_dir).map_err(|error| {
        format!(
            "Failed to create launcher log directory {}: {}",
            log_dir.display(),
            error
        )
    })?;

    let file_name = log_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format!("Invalid launcher log file name: {}", log_path.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(log_dir)
        .map_err(|error| {
            format!(
                "Failed to open launcher log {}: {}",
                log_path.display(),
                error
            )
        })
}

/// Installs the global subscriber: stderr always, plus the log file when it
/// can be opened. Returns the file error so the caller can report it once
/// the stderr layer is live.
pub(crate) fn init_logging(log_path: &Path) -> Result<(), String> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, file_error) = match file_appender(log_path) {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = LOG_WORKER_GUARD.set(guard);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                None,
            )
        }
        Err(error) => (None, Some(error)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|error| format!("Failed to install launcher log subscriber: {error}"))?;

    match file_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

pub(crate) fn append_launcher_log(message: &str) {
    tracing::info!(target: "planalyze::launcher", "{message}");
}

pub(crate) fn append_action_log(message: &str) {
    tracing::info!(target: "planalyze::action", "{message}");
}

pub(crate) fn append_server_log(message: &str) {
    tracing::info!(target: "planalyze::server", "{message}");
}

pub(crate) fn append_shutdown_log(message: &str) {
    tracing::info!(target: "planalyze::shutdown", "{message}");
}
