//! Config loading and persistence.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::SortKey;
use crate::image::{DEFAULT_MAX_BYTES, EncodeLimits};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sort applied when `list` is invoked without `--sort`.
    pub default_sort: Option<SortKey>,

    /// Override for the data directory; env/CLI still win over this.
    pub data_dir: Option<PathBuf>,

    pub image: ImageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_sort: None,
            data_dir: None,
            image: ImageConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub max_bytes: u64,
    pub encode_timeout_ms: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            encode_timeout_ms: 10_000,
        }
    }
}

impl ImageConfig {
    pub fn limits(&self) -> EncodeLimits {
        EncodeLimits {
            max_bytes: self.max_bytes,
            timeout: Duration::from_millis(self.encode_timeout_ms),
        }
    }
}

pub fn config_path() -> PathBuf {
    crate::paths::config_dir().join("config.toml")
}

/// Load the config, writing a default one on first run. An unreadable
/// file warns and degrades to defaults; nothing here is fatal.
pub fn load_or_init() -> Config {
    let path = config_path();
    if path.exists() {
        return match load(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("config load failed, using defaults: {e}");
                Config::default()
            }
        };
    }

    let cfg = Config::default();
    if let Err(e) = write_config(&path, &cfg) {
        tracing::warn!("failed to write default config: {e}");
    }
    cfg
}

fn load(path: &Path) -> Result<Config, String> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    toml::from_str(&contents).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

/// Write the config atomically (temp file + rename in the same dir).
fn write_config(path: &Path, cfg: &Config) -> Result<(), String> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| format!("failed to create {}: {e}", dir.display()))?;
    }
    let contents =
        toml::to_string_pretty(cfg).map_err(|e| format!("failed to render config: {e}"))?;
    let dir = path
        .parent()
        .ok_or_else(|| "config path missing parent directory".to_string())?;
    let temp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| format!("failed to create temp file in {}: {e}", dir.display()))?;
    fs::write(temp.path(), contents.as_bytes())
        .map_err(|e| format!("failed to write config temp file: {e}"))?;
    temp.persist(path)
        .map_err(|e| format!("failed to persist config to {}: {e}", path.display()))?;
    Ok(())
}
