//! # Menu Items
//!
//! A dish or drink on a restaurant's menu. Orders keep their own copies, so
//! editing or removing a menu item never changes an order already placed.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{validate_entity_id, validate_name, validate_price, ValidationResult};

/// A menu entry offered by one restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    /// Unique within the owning restaurant's menu.
    pub id: String,

    pub name: String,

    pub description: String,

    /// Free-form grouping ("Pizza", "Drink", ...).
    pub category: String,

    /// Must be positive for the item to be valid.
    pub price: Money,

    /// Inactive items stay on the menu but cannot be ordered.
    pub active: bool,

    /// Restaurant that owns this item.
    pub restaurant_id: String,
}

impl MenuItem {
    /// Creates an active menu item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        category: impl Into<String>,
        restaurant_id: impl Into<String>,
    ) -> Self {
        MenuItem {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
            price,
            active: true,
            restaurant_id: restaurant_id.into(),
        }
    }

    /// Checks id, name and price.
    ///
    /// ## Rules
    /// - id: non-empty, id charset
    /// - name: non-empty
    /// - price: > 0
    pub fn validate(&self) -> ValidationResult<()> {
        validate_entity_id(&self.id, "menu item id")?;
        validate_name(&self.name, "menu item name")?;
        validate_price(self.price)?;
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Updates the price; ignored unless positive.
    pub fn set_price(&mut self, price: Money) -> bool {
        if price.is_positive() {
            self.price = price;
            true
        } else {
            false
        }
    }
}

/// Menu line: `[PROD001] Pizza Margherita - $35.00 - Pizza`.
impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {} - {}", self.id, self.name, self.price, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margherita() -> MenuItem {
        MenuItem::new(
            "PROD001",
            "Pizza Margherita",
            "Tomato, mozzarella and basil",
            Money::from_cents(3500),
            "Pizza",
            "REST001",
        )
    }

    #[test]
    fn test_new_item_is_active_and_valid() {
        let item = margherita();
        assert!(item.active);
        assert!(item.is_valid());
    }

    #[test]
    fn test_validation_rules() {
        let mut item = margherita();
        item.price = Money::zero();
        assert!(!item.is_valid());

        let mut item = margherita();
        item.name = "  ".to_string();
        assert!(!item.is_valid());

        let mut item = margherita();
        item.id = String::new();
        assert!(!item.is_valid());
    }

    #[test]
    fn test_set_price_ignores_non_positive() {
        let mut item = margherita();
        assert!(!item.set_price(Money::zero()));
        assert!(!item.set_price(Money::from_cents(-100)));
        assert_eq!(item.price, Money::from_cents(3500));

        assert!(item.set_price(Money::from_cents(3800)));
        assert_eq!(item.price, Money::from_cents(3800));
    }

    #[test]
    fn test_menu_line() {
        assert_eq!(
            margherita().to_string(),
            "[PROD001] Pizza Margherita - $35.00 - Pizza"
        );
    }
}
