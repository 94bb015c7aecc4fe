//! Centralized configuration paths for datagrid
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/datagrid/`
//! - Windows: `%APPDATA%\datagrid\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "datagrid";
const LOG_FILE: &str = "datagrid.log";

/// Base config directory for datagrid
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/datagrid`
///   - Else: `~/.config/datagrid`
///
/// Windows:
///   - `%APPDATA%\datagrid`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/datagrid/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/datagrid/themes/`
pub fn themes_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("themes"))
}

/// `~/.config/datagrid/themes/{id}.yaml`
pub fn theme_file(id: &str) -> Option<PathBuf> {
    themes_dir().map(|dir| dir.join(format!("{}.yaml", id)))
}

/// `~/.config/datagrid/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Most recent log file (daily rotation produces `datagrid.log.YYYY-MM-DD`)
pub fn log_file() -> Option<PathBuf> {
    logs_dir().map(|dir| latest_log_in(&dir))
}

/// Newest rotated log in `logs_dir`, or the unrotated name when there is none
pub fn latest_log_in(logs_dir: &Path) -> PathBuf {
    let mut log_files: Vec<PathBuf> = fs::read_dir(logs_dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| {
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .map(|n| n.starts_with(LOG_FILE))
                        .unwrap_or(false)
                })
                .collect()
        })
        .unwrap_or_default();

    // YYYY-MM-DD sorts naturally; newest last
    log_files.sort();

    log_files
        .pop()
        .unwrap_or_else(|| logs_dir.join(LOG_FILE))
}

/// File name prefix used by the rolling appender
pub fn log_file_prefix() -> &'static str {
    LOG_FILE
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let config = ensure_config_dir()?;
    let logs = config.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
