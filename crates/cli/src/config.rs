use std::ffi::OsString;
use std::path::{Path, PathBuf};

use libtaw::launch::DEFAULT_COMPAT_LAYER;
use serde::Deserialize;
use tracing::warn;

/// Environment variable overriding `compat_layer`
pub const COMPAT_LAYER_ENV: &str = "TAW_COMPAT_LAYER";

/// Launcher configuration (~/.config/taw-launcher/config.toml)
///
/// ```toml
/// player = "/opt/spark/Spark.exe"
/// compat_layer = "/usr/bin/wine"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Player used when `--player` is not given
    #[serde(default)]
    pub player: Option<PathBuf>,

    /// Program that runs Windows executables on other hosts
    #[serde(default = "default_compat_layer")]
    pub compat_layer: PathBuf,
}

fn default_compat_layer() -> PathBuf {
    PathBuf::from(DEFAULT_COMPAT_LAYER)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player: None,
            compat_layer: default_compat_layer(),
        }
    }
}

impl Config {
    /// Load config from the default location, then apply environment overrides
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
            .with_compat_layer(std::env::var_os(COMPAT_LAYER_ENV))
    }

    /// Load config from a file. A missing file yields defaults; an unreadable
    /// or invalid one is reported and also yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!(path = %path.display(), "Cannot read config: {e}");
                return Self::default();
            }
        };

        toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), "Ignoring invalid config: {e}");
            Self::default()
        })
    }

    /// Replace the compatibility layer when an override is present
    pub fn with_compat_layer(mut self, layer: Option<OsString>) -> Self {
        if let Some(layer) = layer.filter(|l| !l.is_empty()) {
            self.compat_layer = PathBuf::from(layer);
        }
        self
    }

    /// Get config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("taw-launcher/config.toml"))
    }
}
