//! # Store Configuration
//!
//! Where snapshots live and how they are written.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreConfig::from_env()                                                │
//! │       │                                                                 │
//! │       ├── COMANDA_DATA_DIR set?  ──► use it                             │
//! │       │                                                                 │
//! │       └── otherwise ──► platform data dir (directories::ProjectDirs)   │
//! │                          Linux:   ~/.local/share/comanda               │
//! │                          macOS:   ~/Library/Application Support/...    │
//! │                          Windows: %APPDATA%\comanda\...                │
//! │                                                                         │
//! │  COMANDA_PRETTY_JSON=true ──► indented snapshot files                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "COMANDA_DATA_DIR";

/// Environment variable enabling indented JSON snapshots.
pub const PRETTY_ENV: &str = "COMANDA_PRETTY_JSON";

const DEFAULT_MARKER_FILE: &str = ".initialized";

/// Snapshot store configuration.
///
/// ## Example
/// ```rust
/// use comanda_store::StoreConfig;
///
/// let config = StoreConfig::new("./data")
///     .marker_file(".seeded")
///     .pretty(true);
/// assert!(config.marker_path().ends_with(".seeded"));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding every snapshot file.
    pub base_dir: PathBuf,

    /// Name of the zero-byte first-run marker.
    /// Default: `.initialized`
    pub marker_file: String,

    /// Write indented JSON.
    /// Default: false
    pub pretty: bool,
}

impl StoreConfig {
    /// Creates a configuration rooted at `base_dir`. The directory is created
    /// lazily by `SnapshotStore::ensure_storage_ready`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            base_dir: base_dir.into(),
            marker_file: DEFAULT_MARKER_FILE.to_string(),
            pretty: false,
        }
    }

    /// Sets the marker file name.
    pub fn marker_file(mut self, name: impl Into<String>) -> Self {
        self.marker_file = name.into();
        self
    }

    /// Sets whether snapshots are indented.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Loads configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_dir = match env::var(DATA_DIR_ENV) {
            Ok(dir) if dir.trim().is_empty() => {
                return Err(ConfigError::InvalidValue(DATA_DIR_ENV.to_string()))
            }
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir()?,
        };

        let pretty = env::var(PRETTY_ENV)
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue(PRETTY_ENV.to_string()))?;

        Ok(StoreConfig::new(base_dir).pretty(pretty))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn marker_path(&self) -> PathBuf {
        self.base_dir.join(&self.marker_file)
    }
}

/// Platform data directory for the application.
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "comanda", "comanda").ok_or(ConfigError::NoDataDir)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine a data directory; set {DATA_DIR_ENV}")]
    NoDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = StoreConfig::new("/tmp/comanda");
        assert_eq!(config.base_dir(), Path::new("/tmp/comanda"));
        assert_eq!(config.marker_file, ".initialized");
        assert!(!config.pretty);
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::new("/tmp/comanda")
            .marker_file(".seeded")
            .pretty(true);
        assert_eq!(config.marker_path(), PathBuf::from("/tmp/comanda/.seeded"));
        assert!(config.pretty);
    }
}
