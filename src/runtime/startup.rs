use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

const LOG_FILE: &str = "cyan.log";
const LOG_ENV: &str = "CYAN_LOG";
const DEFAULT_FILTER: &str = "cyan=info";

/// The log file sits next to the session state file.
pub fn log_path(state_path: &Path) -> PathBuf {
    state_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(LOG_FILE)
}

/// Route `tracing` output to the log file; the terminal belongs to the UI.
///
/// Any failure leaves logging disabled.
pub fn init_logging(state_path: &Path) {
    let path = log_path(state_path);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = Registry::default()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();
}
