//! # Store & Manager Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError ← Adds collection + path context                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ManagerError ← Also carries CoreError / ValidationError               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UI displays a user-facing message                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Display;
use std::path::{Path, PathBuf};

use comanda_core::{CoreError, Money, ValidationError};
use thiserror::Error;

use crate::store::Collection;

// =============================================================================
// Store Error
// =============================================================================

/// Snapshot storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Base directory could not be created or accessed.
    #[error("Storage directory {} unavailable: {reason}", .path.display())]
    Directory { path: PathBuf, reason: String },

    /// Snapshot file exists but could not be read.
    #[error("Failed to read {collection} from {}: {reason}", .path.display())]
    Read {
        collection: Collection,
        path: PathBuf,
        reason: String,
    },

    /// Snapshot could not be encoded or written.
    ///
    /// ## When This Occurs
    /// - Disk full
    /// - Permissions changed under a running process
    /// - Base directory removed after startup
    #[error("Failed to write {collection} to {}: {reason}", .path.display())]
    Write {
        collection: Collection,
        path: PathBuf,
        reason: String,
    },

    /// Snapshot file was read but does not decode.
    #[error("Corrupt {collection} snapshot at {}: {reason}", .path.display())]
    Corrupt {
        collection: Collection,
        path: PathBuf,
        reason: String,
    },

    /// First-run marker could not be written.
    #[error("Failed to write marker {}: {reason}", .path.display())]
    Marker { path: PathBuf, reason: String },
}

impl StoreError {
    pub(crate) fn directory(path: &Path, err: impl Display) -> Self {
        StoreError::Directory {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn read(collection: Collection, path: &Path, err: impl Display) -> Self {
        StoreError::Read {
            collection,
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn write(collection: Collection, path: &Path, err: impl Display) -> Self {
        StoreError::Write {
            collection,
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn corrupt(collection: Collection, path: &Path, err: impl Display) -> Self {
        StoreError::Corrupt {
            collection,
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

/// Result type for snapshot operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Manager Error
// =============================================================================

/// Everything the order manager can report to its caller.
///
/// Every variant except `Storage` means nothing changed. A `Storage` error
/// after a mutation means memory was updated but disk was not; see
/// `OrderManager::is_dirty`.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// Field-level validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Order cannot be submitted (empty cart, non-positive total).
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Referenced customer, restaurant, order or menu item does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Id already registered.
    #[error("{entity} with id '{id}' already exists")]
    DuplicateId { entity: &'static str, id: String },

    /// Email already used by another account with the same role.
    #[error("Email '{email}' is already registered")]
    EmailTaken { email: String },

    /// Login failed. Deliberately does not say which field was wrong.
    #[error("Invalid email or password")]
    Authentication,

    /// Operation needs a logged-in account.
    #[error("No user is logged in")]
    NotAuthenticated,

    /// Customer balance does not cover the order total.
    #[error("Insufficient credit: balance {balance}, order total {required}")]
    InsufficientCredit { balance: Money, required: Money },

    /// Other entity rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Snapshot I/O failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ManagerError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ManagerError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn duplicate(entity: &'static str, id: impl Into<String>) -> Self {
        ManagerError::DuplicateId {
            entity,
            id: id.into(),
        }
    }

    /// True for the errors `create_order` uses to reject an order
    /// before anything is debited or recorded.
    pub fn is_order_rejection(&self) -> bool {
        matches!(
            self,
            ManagerError::InvalidOrder(_)
                | ManagerError::NotFound { .. }
                | ManagerError::DuplicateId { .. }
                | ManagerError::InsufficientCredit { .. }
        )
    }
}

/// Result type for order manager operations.
pub type ManagerResult<T> = Result<T, ManagerError>;
