use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILE_NAME: &str = "campus.log";

/// Initialize the logging system
///
/// Safe to call more than once; only the first call installs a subscriber.
///
/// # Arguments
/// * `verbose` - Enable verbose (DEBUG) logging
/// * `log_file` - Optional path to log file. If None, logs only to stderr
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    // RUST_LOG overrides the verbose flag
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false) // Don't show module path
        .compact();

    let mut dir_error = None;
    let file_layer = log_file.map(|log_path| {
        let (dir, file_name) = split_log_path(&log_path);
        if let Err(e) = std::fs::create_dir_all(&dir) {
            dir_error = Some((dir.clone(), e));
        }

        // Daily rotation, structured JSON, no ANSI colors
        fmt::layer()
            .with_writer(tracing_appender::rolling::daily(dir, file_name))
            .with_ansi(false)
            .json()
    });

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    // Reported after install so the warning reaches stderr
    if let Some((dir, e)) = dir_error {
        tracing::warn!(dir = %dir.display(), error = %e, "Could not create log directory");
    }
    if !installed {
        tracing::debug!("Logging already initialized, keeping existing subscriber");
    }
}

fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("campus={}", level)
}

/// Directory and file-name prefix for the rolling appender.
fn split_log_path(log_path: &Path) -> (PathBuf, OsString) {
    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = log_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(DEFAULT_LOG_FILE_NAME));
    (dir, file_name)
}
