//! Platform directory resolution.
//!
//! The session file and trace export live in the per-user data directory,
//! configuration in the per-user config directory. Both are resolved with
//! [`dirs`] and fall back to the working directory on platforms that have
//! no home directory.

use std::path::{Path, PathBuf};

/// Directory name used under the platform data and config roots.
pub const APP_DIR_NAME: &str = "abtube";

/// Configuration file looked up in [`get_config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the data directory for session storage and trace files.
///
/// Typically `~/.local/share/abtube` on Linux and
/// `~/Library/Application Support/abtube` on macOS.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Returns the configuration directory, typically `~/.config/abtube`.
#[must_use]
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Default location of the configuration file.
#[must_use]
pub fn default_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE_NAME)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and every path when no home directory is
/// known, are returned unchanged.
///
/// # Examples
///
/// ```
/// use abtube::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// if let Some(home) = dirs::home_dir() {
///     assert_eq!(expand_tilde("~/videos"), home.join("videos"));
/// }
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Creates `dir` and its parents if missing.
///
/// # Errors
///
/// Returns the underlying I/O error if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    tracing::debug!(dir = %dir.display(), "creating directory");
    std::fs::create_dir_all(dir)
}
