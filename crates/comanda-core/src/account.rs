//! # Accounts
//!
//! What customers and restaurants share: a login, contact details and a role.
//!
//! ## Account Capability
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────────┐                         ┌──────────────┐            │
//! │   │   Customer   │──┐                  ┌───│  Restaurant  │            │
//! │   └──────────────┘  │   impl Account   │   └──────────────┘            │
//! │                     ▼                  ▼                                │
//! │              ┌──────────────────────────────┐                          │
//! │              │ id · name · credentials      │                          │
//! │              │ role() · verify() · session  │                          │
//! │              └──────────────────────────────┘                          │
//! │                             │                                           │
//! │                             ▼                                           │
//! │                 Session { actor_id, role }                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Passwords are hashed with Argon2 on the way in; only the PHC string is kept.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::{validate_email, validate_password};

// =============================================================================
// Role
// =============================================================================

/// Which side of the marketplace an account is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Restaurant,
}

impl Role {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Restaurant => "Restaurant",
        }
    }
}

// =============================================================================
// Contact
// =============================================================================

/// Contact details shown on orders and receipts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Contact {
    pub phone: String,
    pub address: String,
}

impl Contact {
    pub fn new(phone: impl Into<String>, address: impl Into<String>) -> Self {
        Contact {
            phone: phone.into(),
            address: address.into(),
        }
    }
}

// =============================================================================
// Credentials
// =============================================================================

/// Login email plus an Argon2 password hash.
///
/// Emails are normalized (trimmed, lowercased) so that `Joao@Email.com` and
/// `joao@email.com` are the same login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    email: String,
    password_hash: String,
}

impl Credentials {
    /// Validates the email and password, then hashes the password.
    ///
    /// ## Errors
    /// - `CoreError::Validation` for a malformed email or short password
    /// - `CoreError::Credentials` if hashing fails
    pub fn new(email: &str, password: &str) -> CoreResult<Self> {
        validate_email(email)?;
        validate_password(password)?;

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CoreError::Credentials(format!("Failed to hash password: {}", e)))?
            .to_string();

        Ok(Credentials {
            email: normalize_email(email),
            password_hash,
        })
    }

    /// The normalized login email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Checks an email/password pair against these credentials.
    ///
    /// Returns false for a malformed stored hash instead of erroring; a
    /// corrupt hash simply never authenticates.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        if self.email != normalize_email(email) {
            return false;
        }

        let parsed_hash = match PasswordHash::new(&self.password_hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Never print the hash.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// =============================================================================
// Account Trait
// =============================================================================

/// Capability shared by every entity that can log in.
pub trait Account {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn credentials(&self) -> &Credentials;

    fn role(&self) -> Role;

    fn email(&self) -> &str {
        self.credentials().email()
    }

    /// True when the email/password pair belongs to this account.
    fn verify(&self, email: &str, password: &str) -> bool {
        self.credentials().matches(email, password)
    }

    /// Opens a session for this account, stamped with the current time.
    fn start_session(&self) -> Session {
        Session {
            actor_id: self.id().to_string(),
            actor_name: self.name().to_string(),
            role: self.role(),
            started_at: Utc::now(),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// The authenticated actor, returned by a successful login.
///
/// A plain value: callers keep it and pass `actor_id` to operations that act
/// on behalf of the logged-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub actor_id: String,
    pub actor_name: String,
    pub role: Role,
    #[ts(as = "String")]
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn is_customer(&self) -> bool {
        self.role == Role::Customer
    }

    pub fn is_restaurant(&self) -> bool {
        self.role == Role::Restaurant
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_match() {
        let creds = Credentials::new("joao@email.com", "senha123").unwrap();

        assert!(creds.matches("joao@email.com", "senha123"));
        assert!(creds.matches("  Joao@Email.COM ", "senha123"));
        assert!(!creds.matches("joao@email.com", "senha124"));
        assert!(!creds.matches("maria@email.com", "senha123"));
    }

    #[test]
    fn test_credentials_do_not_store_plaintext() {
        let creds = Credentials::new("joao@email.com", "senha123").unwrap();
        let json = serde_json::to_string(&creds).unwrap();

        assert!(!json.contains("senha123"));
        assert!(json.contains("$argon2"));
        assert!(!format!("{:?}", creds).contains("argon2"));
    }

    #[test]
    fn test_credentials_survive_serialization() {
        let creds = Credentials::new("pizza@email.com", "senha123").unwrap();
        let json = serde_json::to_string(&creds).unwrap();
        let restored: Credentials = serde_json::from_str(&json).unwrap();

        assert!(restored.matches("pizza@email.com", "senha123"));
    }

    #[test]
    fn test_credentials_reject_bad_input() {
        assert!(matches!(
            Credentials::new("not-an-email", "senha123"),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            Credentials::new("joao@email.com", "abc"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_role_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Restaurant).unwrap(), "\"restaurant\"");
        assert_eq!(Role::Customer.label(), "Customer");
    }
}
