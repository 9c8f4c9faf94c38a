//! # Validation Module
//!
//! Input validation for registration and menu management.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI forms                                                     │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Order manager (comanda-store)                                │
//! │  └── THIS MODULE: field rules before an entity is accepted             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Entity methods                                               │
//! │  ├── debit_credit refuses to overdraw                                  │
//! │  └── add_menu_item refuses duplicate ids                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comanda_core::validation::{validate_email, validate_price};
//! use comanda_core::Money;
//!
//! validate_email("joao@email.com").unwrap();
//! validate_price(Money::from_cents(3500)).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of ids (customer, restaurant, menu item, order).
pub const MAX_ID_LEN: usize = 64;

/// Maximum length of display names.
pub const MAX_NAME_LEN: usize = 200;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an entity id.
///
/// ## Rules
/// - Must not be empty
/// - No leading or trailing whitespace
/// - At most 64 characters
/// - Letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use comanda_core::validation::validate_entity_id;
///
/// assert!(validate_entity_id("CLI001", "customer id").is_ok());
/// assert!(validate_entity_id("", "customer id").is_err());
/// assert!(validate_entity_id("has space", "customer id").is_err());
/// ```
pub fn validate_entity_id(id: &str, field: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    // Ids are stored as given, so " CLI001" would be a second customer.
    if id.trim() != id {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not have leading or trailing whitespace".to_string(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name (customer, restaurant or menu item).
pub fn validate_name(name: &str, field: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot that is not at either end
///
/// This is a sanity check, not RFC 5322.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain.tld"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    Ok(())
}

/// Validates a plaintext password before it is hashed.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Money Validators
// =============================================================================

/// Validates a menu item price.
///
/// ## Rules
/// - Must be positive (> 0); free items are not sold through the menu
///
/// ## Example
/// ```rust
/// use comanda_core::validation::validate_price;
/// use comanda_core::Money;
///
/// assert!(validate_price(Money::from_cents(800)).is_ok());
/// assert!(validate_price(Money::zero()).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a restaurant delivery fee.
///
/// ## Rules
/// - Must be non-negative; zero means free delivery
pub fn validate_delivery_fee(fee: Money) -> ValidationResult<()> {
    if fee.is_negative() {
        return Err(ValidationError::Negative {
            field: "delivery fee".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
