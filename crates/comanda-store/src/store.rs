//! # Snapshot Store
//!
//! Whole-collection persistence. Each save serializes an entire collection and
//! replaces its file; each load reads it back in full.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Atomic Snapshot Write                              │
//! │                                                                         │
//! │  save(Collection::Orders, &orders)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  NamedTempFile::new_in(base_dir)   ← same filesystem as the target     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  serde_json::to_writer ──► sync_all                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  persist(orders.json)              ← rename over the old snapshot      │
//! │                                                                         │
//! │  A crash at any point leaves either the old or the new file, never     │
//! │  a truncated one.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Layout
//! ```text
//! <base_dir>/
//! ├── customers.json
//! ├── restaurants.json
//! ├── menu_items.json
//! ├── orders.json
//! └── .initialized
//! ```

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Collections
// =============================================================================

/// The persisted collections, one file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Customers,
    Restaurants,
    MenuItems,
    Orders,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Customers,
        Collection::Restaurants,
        Collection::MenuItems,
        Collection::Orders,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Customers => "customers.json",
            Collection::Restaurants => "restaurants.json",
            Collection::MenuItems => "menu_items.json",
            Collection::Orders => "orders.json",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Collection::Customers => "customers",
            Collection::Restaurants => "restaurants",
            Collection::MenuItems => "menu items",
            Collection::Orders => "orders",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Store
// =============================================================================

/// File-backed snapshot store rooted at one directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    config: StoreConfig,
}

impl SnapshotStore {
    pub fn new(config: StoreConfig) -> Self {
        SnapshotStore { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn base_dir(&self) -> &Path {
        self.config.base_dir()
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.base_dir().join(collection.file_name())
    }

    pub fn marker_path(&self) -> PathBuf {
        self.config.marker_path()
    }

    /// Creates the base directory if needed.
    pub fn ensure_storage_ready(&self) -> StoreResult<()> {
        let dir = self.base_dir();
        fs::create_dir_all(dir).map_err(|e| StoreError::directory(dir, e))?;
        debug!(path = %dir.display(), "Storage directory ready");
        Ok(())
    }

    /// Replaces the snapshot of `collection` with `items`.
    pub fn save<T: Serialize>(&self, collection: Collection, items: &[T]) -> StoreResult<()> {
        let path = self.path_for(collection);
        let write_err = |e: &dyn fmt::Display| StoreError::write(collection, &path, e);

        let tmp = NamedTempFile::new_in(self.base_dir()).map_err(|e| write_err(&e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            let encoded = if self.config.pretty {
                serde_json::to_writer_pretty(&mut writer, items)
            } else {
                serde_json::to_writer(&mut writer, items)
            };
            encoded.map_err(|e| write_err(&e))?;
            writer.flush().map_err(|e| write_err(&e))?;
        }
        tmp.as_file().sync_all().map_err(|e| write_err(&e))?;
        tmp.persist(&path).map_err(|e| write_err(&e.error))?;

        debug!(
            collection = %collection,
            count = items.len(),
            path = %path.display(),
            "Snapshot saved"
        );
        Ok(())
    }

    /// Reads the snapshot of `collection`. A missing file is an empty collection.
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> StoreResult<Vec<T>> {
        let path = self.path_for(collection);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(collection = %collection, "No snapshot yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::read(collection, &path, e)),
        };

        let items: Vec<T> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            if e.is_io() {
                StoreError::read(collection, &path, e)
            } else {
                StoreError::corrupt(collection, &path, e)
            }
        })?;

        debug!(collection = %collection, count = items.len(), "Snapshot loaded");
        Ok(items)
    }

    /// Deletes every snapshot file. Failures are logged, not returned.
    pub fn purge_all(&self) {
        for collection in Collection::ALL {
            let path = self.path_for(collection);
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "Snapshot removed"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove snapshot"),
            }
        }
    }

    /// True when all four snapshot files exist.
    pub fn all_files_present(&self) -> bool {
        Collection::ALL
            .iter()
            .all(|c| self.path_for(*c).is_file())
    }

    // =========================================================================
    // First-Run Marker
    // =========================================================================

    pub fn is_initialized(&self) -> bool {
        self.marker_path().is_file()
    }

    /// Writes the zero-byte marker.
    pub fn mark_initialized(&self) -> StoreResult<()> {
        let path = self.marker_path();
        File::create(&path).map_err(|e| StoreError::Marker {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), "Storage marked initialized");
        Ok(())
    }

    /// Purges all snapshots and the marker.
    pub fn reset(&self) {
        self.purge_all();
        let marker = self.marker_path();
        if let Err(e) = fs::remove_file(&marker) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %marker.display(), error = %e, "Failed to remove marker");
            }
        }
        info!(path = %self.base_dir().display(), "Storage reset");
    }
}
