//! # Restaurant
//!
//! A restaurant owns a menu (unique by item id), charges a delivery fee and
//! keeps the ids of the orders it received.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::account::{Account, Contact, Credentials, Role};
use crate::menu::MenuItem;
use crate::money::Money;
use crate::validation::{validate_delivery_fee, validate_entity_id, validate_name, ValidationResult};

/// A registered restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Restaurant {
    id: String,
    name: String,
    #[ts(skip)]
    credentials: Credentials,
    contact: Contact,
    /// Company registration document (CNPJ).
    document: String,
    /// Cuisine ("Pizzeria", "Burgers", ...).
    category: String,
    delivery_fee: Money,
    open: bool,
    menu: Vec<MenuItem>,
    /// Orders received, oldest first. Resolved against the master order list.
    received_order_ids: Vec<String>,
}

impl Restaurant {
    /// Creates an open restaurant with an empty menu.
    ///
    /// A negative fee is clamped to zero.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        credentials: Credentials,
        contact: Contact,
        document: impl Into<String>,
        category: impl Into<String>,
        delivery_fee: Money,
    ) -> Self {
        Restaurant {
            id: id.into(),
            name: name.into(),
            credentials,
            contact,
            document: document.into(),
            category: category.into(),
            delivery_fee: if delivery_fee.is_negative() {
                Money::zero()
            } else {
                delivery_fee
            },
            open: true,
            menu: Vec::new(),
            received_order_ids: Vec::new(),
        }
    }

    /// Checks the fields a registration must have.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_entity_id(&self.id, "restaurant id")?;
        validate_name(&self.name, "restaurant name")?;
        validate_delivery_fee(self.delivery_fee)?;
        Ok(())
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Adds an item unless one with the same id is already on the menu.
    ///
    /// Returns false for a duplicate; the existing item is left untouched.
    pub fn add_menu_item(&mut self, item: MenuItem) -> bool {
        if self.menu_item(&item.id).is_some() {
            return false;
        }
        self.menu.push(item);
        true
    }

    /// Removes an item by id, returning it.
    pub fn remove_menu_item(&mut self, item_id: &str) -> Option<MenuItem> {
        let index = self.menu.iter().position(|p| p.id == item_id)?;
        Some(self.menu.remove(index))
    }

    pub fn menu_item(&self, item_id: &str) -> Option<&MenuItem> {
        self.menu.iter().find(|p| p.id == item_id)
    }

    /// Mutable access for edits that cannot break id uniqueness
    /// (price, description, active flag). Do not change the id through this.
    pub fn menu_item_mut(&mut self, item_id: &str) -> Option<&mut MenuItem> {
        self.menu.iter_mut().find(|p| p.id == item_id)
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    /// Items that can currently be ordered.
    pub fn active_menu(&self) -> impl Iterator<Item = &MenuItem> {
        self.menu.iter().filter(|p| p.active)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Records a received order id. Called by the order manager.
    pub fn receive_order(&mut self, order_id: impl Into<String>) {
        self.received_order_ids.push(order_id.into());
    }

    pub fn received_order_ids(&self) -> &[String] {
        &self.received_order_ids
    }

    pub fn received_order_count(&self) -> usize {
        self.received_order_ids.len()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }

    /// Updates the delivery fee; negative values are ignored.
    pub fn set_delivery_fee(&mut self, fee: Money) -> bool {
        if fee.is_negative() {
            return false;
        }
        self.delivery_fee = fee;
        true
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn document(&self) -> &str {
        &self.document
    }
}

impl Account for Restaurant {
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
        Role::Restaurant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant() -> Restaurant {
        let creds = Credentials::new("pizza@email.com", "senha123").unwrap();
        Restaurant::new(
            "REST001",
            "Pizza Delícia",
            creds,
            Contact::new("(11) 3333-0001", "Av. Principal, 100"),
            "12.345.678/0001-00",
            "Pizzeria",
            Money::from_cents(500),
        )
    }

    fn item(id: &str, cents: i64) -> MenuItem {
        MenuItem::new(id, "Item", "", Money::from_cents(cents), "Pizza", "REST001")
    }

    #[test]
    fn test_new_restaurant_defaults() {
        let r = restaurant();
        assert!(r.is_open());
        assert!(r.menu().is_empty());
        assert_eq!(r.delivery_fee(), Money::from_cents(500));
        assert_eq!(r.role(), Role::Restaurant);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_negative_fee_clamped_on_create() {
        let creds = Credentials::new("x@email.com", "senha123").unwrap();
        let r = Restaurant::new("R", "R", creds, Contact::default(), "", "", Money::from_cents(-1));
        assert!(r.delivery_fee().is_zero());
    }

    #[test]
    fn test_add_menu_item_rejects_duplicate_id() {
        let mut r = restaurant();
        assert!(r.add_menu_item(item("PROD001", 3500)));
        assert!(!r.add_menu_item(item("PROD001", 9900)));

        assert_eq!(r.menu().len(), 1);
        assert_eq!(r.menu_item("PROD001").unwrap().price, Money::from_cents(3500));
    }

    #[test]
    fn test_remove_menu_item() {
        let mut r = restaurant();
        r.add_menu_item(item("PROD001", 3500));
        r.add_menu_item(item("PROD004", 800));

        let removed = r.remove_menu_item("PROD001").unwrap();
        assert_eq!(removed.id, "PROD001");
        assert!(r.remove_menu_item("PROD001").is_none());
        assert_eq!(r.menu().len(), 1);
    }

    #[test]
    fn test_active_menu_filters_inactive() {
        let mut r = restaurant();
        r.add_menu_item(item("PROD001", 3500));
        r.add_menu_item(item("PROD002", 3800));
        r.menu_item_mut("PROD002").unwrap().active = false;

        let ids: Vec<&str> = r.active_menu().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["PROD001"]);
    }

    #[test]
    fn test_set_delivery_fee_ignores_negative() {
        let mut r = restaurant();
        assert!(!r.set_delivery_fee(Money::from_cents(-100)));
        assert_eq!(r.delivery_fee(), Money::from_cents(500));
        assert!(r.set_delivery_fee(Money::zero()));
        assert!(r.delivery_fee().is_zero());
    }

    #[test]
    fn test_receive_order() {
        let mut r = restaurant();
        r.receive_order("PED001");
        assert_eq!(r.received_order_ids(), &["PED001".to_string()]);
        assert_eq!(r.received_order_count(), 1);
    }
}
