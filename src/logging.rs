//! Logger setup.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use log::LevelFilter;

/// Returns the file the log is appended to, if the platform has a data directory.
pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("still-life").join("still-life.log"))
}

/// Resolves the effective level: `RUST_LOG` (a bare level name) wins over the config value.
pub fn resolve_level(configured: &str, env: Option<&str>) -> LevelFilter {
    env.and_then(|v| v.trim().parse().ok())
        .or_else(|| configured.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Where the installed logger writes besides stdout.
#[derive(Debug, Default)]
pub struct LogTargets {
    /// The log file in use, if any.
    pub file: Option<PathBuf>,
    /// Why the requested log file could not be opened.
    pub file_error: Option<String>,
}

/// Opens `path` for appending, creating its parent directories.
pub fn open_log_file(path: &Path) -> Result<File, String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }
    fern::log_file(path).map_err(|e| format!("failed to open {}: {e}", path.display()))
}

/// Installs the global logger. Must be called once, before anything logs.
///
/// A log file that cannot be opened does not stop stdout logging; the reason is reported
/// in [`LogTargets::file_error`].
pub fn setup_logger(level: LevelFilter, log_file: Option<&Path>) -> Result<LogTargets, String> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    let mut targets = LogTargets::default();
    if let Some(path) = log_file {
        match open_log_file(path) {
            Ok(file) => {
                dispatch = dispatch.chain(file);
                targets.file = Some(path.to_path_buf());
            }
            Err(e) => targets.file_error = Some(e),
        }
    }

    dispatch.apply().map_err(|e| e.to_string())?;
    if let Some(e) = &targets.file_error {
        log::warn!("logging to stdout only: {e}");
    }
    Ok(targets)
}
