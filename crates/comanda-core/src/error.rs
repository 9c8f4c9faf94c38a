//! # Error Types
//!
//! Domain-specific error types for comanda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comanda-core errors (this file)                                       │
//! │  ├── CoreError        - Entity rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  comanda-store errors (separate crate)                                 │
//! │  ├── StoreError       - Snapshot read/write failures                   │
//! │  └── ManagerError     - What callers of the order manager see          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ManagerError → UI                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Entity rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Debit larger than the current balance.
    ///
    /// ## User Workflow
    /// ```text
    /// Confirm order (total: $48.00)
    ///      │
    ///      ▼
    /// debit_credit($48.00), balance=$10.00
    ///      │
    ///      ▼
    /// InsufficientCredit { balance: $10.00, requested: $48.00 }
    ///      │
    ///      ▼
    /// UI shows: "Insufficient credit. Current balance: $10.00"
    /// ```
    #[error("Insufficient credit: balance {balance}, requested {requested}")]
    InsufficientCredit { balance: Money, requested: Money },

    /// Credit amounts must be positive.
    #[error("Invalid amount {amount}: must be greater than zero")]
    InvalidAmount { amount: Money },

    /// Order item index does not exist.
    #[error("Item index {index} out of range (order has {len} items)")]
    ItemIndexOutOfRange { index: usize, len: usize },

    /// Password hashing or hash parsing failed.
    #[error("Credential error: {0}")]
    Credentials(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before an entity is accepted by the order manager.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientCredit {
            balance: Money::from_cents(1000),
            requested: Money::from_cents(4800),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient credit: balance $10.00, requested $48.00"
        );

        let err = CoreError::ItemIndexOutOfRange { index: 3, len: 2 };
        assert_eq!(err.to_string(), "Item index 3 out of range (order has 2 items)");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
