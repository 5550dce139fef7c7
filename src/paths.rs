//! XDG directory helpers for config/data locations.

use std::path::PathBuf;

/// Base directory for persistent data (the collection store).
///
/// Uses `COSPLOG_DATA_DIR` if set, otherwise `$XDG_DATA_HOME/cosplog` or
/// `~/.local/share/cosplog`.
pub(crate) fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("COSPLOG_DATA_DIR")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }

    std::env::var("XDG_DATA_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".local")
                .join("share")
        })
        .join("cosplog")
}

/// Base directory for configuration.
///
/// Uses `COSPLOG_CONFIG_DIR` if set, otherwise `$XDG_CONFIG_HOME/cosplog`
/// or `~/.config/cosplog`.
pub(crate) fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("COSPLOG_CONFIG_DIR")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }

    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".config")
        })
        .join("cosplog")
}
