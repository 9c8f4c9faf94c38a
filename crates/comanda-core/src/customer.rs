//! # Customer
//!
//! A customer holds a prepaid credit balance and the ids of the orders they
//! placed.
//!
//! ## Credit Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  credit >= 0, always                                                    │
//! │                                                                         │
//! │  add_credit(amount)     amount <= 0 ──► no-op, false                   │
//! │                         overflow    ──► no-op, false                   │
//! │                         otherwise   ──► credit += amount               │
//! │                                                                         │
//! │  debit_credit(amount)   amount <= 0      ──► InvalidAmount             │
//! │                         amount > credit  ──► InsufficientCredit        │
//! │                         otherwise        ──► credit -= amount          │
//! │                                                                         │
//! │  `credit` is private: these two methods are the only writers.          │
//! │  Deserialization rejects a negative stored balance.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::account::{Account, Contact, Credentials, Role};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_entity_id, validate_name, ValidationResult};

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Customer {
    id: String,
    name: String,
    #[ts(skip)]
    credentials: Credentials,
    contact: Contact,
    /// National tax document (CPF).
    document: String,
    credit: Money,
    active: bool,
    /// Orders placed, oldest first. Resolved against the master order list.
    order_ids: Vec<String>,
}

impl Customer {
    /// Creates an active customer with zero credit and no orders.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        credentials: Credentials,
        contact: Contact,
        document: impl Into<String>,
    ) -> Self {
        Customer {
            id: id.into(),
            name: name.into(),
            credentials,
            contact,
            document: document.into(),
            credit: Money::zero(),
            active: true,
            order_ids: Vec::new(),
        }
    }

    /// Checks the fields a registration must have.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_entity_id(&self.id, "customer id")?;
        validate_name(&self.name, "customer name")?;
        Ok(())
    }

    // =========================================================================
    // Credit
    // =========================================================================

    pub fn credit(&self) -> Money {
        self.credit
    }

    /// Adds credit. Returns false, leaving the balance unchanged, for zero or
    /// negative amounts and for a top-up that would overflow.
    pub fn add_credit(&mut self, amount: Money) -> bool {
        if !amount.is_positive() {
            return false;
        }
        match self.credit.checked_add(amount) {
            Some(credit) => {
                self.credit = credit;
                true
            }
            None => false,
        }
    }

    /// Removes credit if, and only if, the balance covers it.
    ///
    /// Returns the new balance. On error the balance is unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::{Contact, Credentials, Customer, Money};
    ///
    /// let creds = Credentials::new("joao@email.com", "senha123").unwrap();
    /// let mut c = Customer::new("CLI001", "João", creds, Contact::default(), "");
    /// c.add_credit(Money::from_cents(50000));
    ///
    /// assert_eq!(c.debit_credit(Money::from_cents(4800)).unwrap(), Money::from_cents(45200));
    /// assert!(c.debit_credit(Money::from_cents(99999)).is_err());
    /// assert_eq!(c.credit(), Money::from_cents(45200));
    /// ```
    pub fn debit_credit(&mut self, amount: Money) -> CoreResult<Money> {
        if !amount.is_positive() {
            return Err(CoreError::InvalidAmount { amount });
        }

        let remaining = self
            .credit
            .checked_debit(amount)
            .ok_or(CoreError::InsufficientCredit {
                balance: self.credit,
                requested: amount,
            })?;

        self.credit = remaining;
        Ok(remaining)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Records an order id. Called by the order manager after a successful debit.
    pub fn attach_order(&mut self, order_id: impl Into<String>) {
        self.order_ids.push(order_id.into());
    }

    pub fn order_ids(&self) -> &[String] {
        &self.order_ids
    }

    pub fn order_count(&self) -> usize {
        self.order_ids.len()
    }

    pub fn has_order(&self, order_id: &str) -> bool {
        self.order_ids.iter().any(|id| id == order_id)
    }

    // =========================================================================
    // Profile
    // =========================================================================

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn set_contact(&mut self, contact: Contact) {
        self.contact = contact;
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn set_document(&mut self, document: impl Into<String>) {
        self.document = document.into();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Stored shape of a customer, checked before it becomes a `Customer`.
#[derive(Deserialize)]
struct CustomerRecord {
    id: String,
    name: String,
    credentials: Credentials,
    contact: Contact,
    document: String,
    credit: Money,
    active: bool,
    order_ids: Vec<String>,
}

impl<'de> Deserialize<'de> for Customer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = CustomerRecord::deserialize(deserializer)?;
        if record.credit.is_negative() {
            return Err(serde::de::Error::custom(format!(
                "customer {} has negative credit {}",
                record.id, record.credit
            )));
        }

        Ok(Customer {
            id: record.id,
            name: record.name,
            credentials: record.credentials,
            contact: record.contact,
            document: record.document,
            credit: record.credit,
            active: record.active,
            order_ids: record.order_ids,
        })
    }
}

impl Account for Customer {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn role(&self) -> Role {
        Role::Customer
    }
}
