//! # Orders
//!
//! An order is a list of menu item snapshots plus a delivery fee. Its total is
//! kept in step with its items: every add or remove recomputes it, and so
//! does deserialization. A stored total is never trusted.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. DRAFT (caller side)                                                │
//! │     └── Order::new / Order::draft → empty, total = delivery fee        │
//! │     └── add_item() / remove_item() → total recomputed                  │
//! │                                                                         │
//! │  2. SUBMIT                                                             │
//! │     └── OrderManager::create_order() → credit debited, order recorded  │
//! │                                                                         │
//! │  3. STATUS                                                             │
//! │     Pending → Confirmed → Preparing → Ready → Delivered                │
//! │        └──────────┴───────────┴─────────┴──► Cancelled                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Write as _;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::menu::MenuItem;
use crate::money::Money;

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in its progression.
///
/// The usual path is linear; `Cancelled` can be reached from any
/// non-terminal state. `Delivered` and `Cancelled` are terminal in intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed and paid, waiting for the restaurant.
    #[default]
    Pending,
    Confirmed,
    Preparing,
    /// Waiting for pickup by the courier.
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in progression order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The next step on the linear path, if any.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer's order from one restaurant.
///
/// ## Invariant
/// `total == sum(item prices) + delivery_fee` after every mutation. Fields are
/// private so the total cannot drift from the items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Order {
    id: String,
    customer_id: String,
    restaurant_id: String,
    /// Frozen copies of the menu items at the time they were added.
    items: Vec<MenuItem>,
    status: OrderStatus,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
    note: String,
    delivery_fee: Money,
    total: Money,
}

impl Order {
    /// Creates an empty pending order. The total starts at the delivery fee.
    ///
    /// A negative fee is clamped to zero.
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        restaurant_id: impl Into<String>,
        delivery_fee: Money,
    ) -> Self {
        Order {
            id: id.into(),
            customer_id: customer_id.into(),
            restaurant_id: restaurant_id.into(),
            items: Vec::new(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            note: String::new(),
            delivery_fee: non_negative(delivery_fee),
            total: non_negative(delivery_fee),
        }
    }

    /// Same as [`Order::new`] with a generated UUID v4 id.
    pub fn draft(
        customer_id: impl Into<String>,
        restaurant_id: impl Into<String>,
        delivery_fee: Money,
    ) -> Self {
        Order::new(Uuid::new_v4().to_string(), customer_id, restaurant_id, delivery_fee)
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Appends a snapshot of `item` and recomputes the total.
    ///
    /// Inactive items, and items whose price would overflow the total, are
    /// ignored: returns false and nothing changes.
    pub fn add_item(&mut self, item: &MenuItem) -> bool {
        if !item.active {
            return false;
        }
        let Some(total) = self.total.checked_add(item.price) else {
            return false;
        };
        self.items.push(item.clone());
        self.total = total;
        true
    }

    /// Removes the item at `index` and recomputes the total.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<MenuItem> {
        if index >= self.items.len() {
            return Err(CoreError::ItemIndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.recalculate_total();
        Ok(removed)
    }

    fn recalculate_total(&mut self) {
        // Items only leave here, so the new total is bounded by the old one.
        self.total = computed_total(self.delivery_fee, &self.items).unwrap_or(self.total);
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of item prices, without the delivery fee.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|p| p.price).sum()
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// An order can be submitted only with at least one item and a positive total.
    pub fn is_valid(&self) -> bool {
        !self.items.is_empty() && self.total.is_positive()
    }

    // =========================================================================
    // Status & metadata
    // =========================================================================

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Sets the status unconditionally.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Human-readable receipt.
    ///
    /// ```text
    /// Order PED001
    /// Status: Pending
    /// Date: 19/10/2026 12:30
    ///
    ///   1. Pizza Margherita - $35.00
    ///   2. Soda 2L - $8.00
    ///
    /// Subtotal: $43.00
    /// Delivery: $5.00
    /// TOTAL: $48.00
    /// ```
    pub fn details(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Order {}", self.id);
        let _ = writeln!(out, "Status: {}", self.status);
        let _ = writeln!(out, "Date: {}", self.created_at.format("%d/%m/%Y %H:%M"));
        out.push('\n');

        for (i, item) in self.items.iter().enumerate() {
            let _ = writeln!(out, "  {}. {} - {}", i + 1, item.name, item.price);
        }

        out.push('\n');
        let _ = writeln!(out, "Subtotal: {}", self.subtotal());
        let _ = writeln!(out, "Delivery: {}", self.delivery_fee);
        let _ = writeln!(out, "TOTAL: {}", self.total);

        if !self.note.is_empty() {
            let _ = writeln!(out, "Note: {}", self.note);
        }

        out
    }
}

fn non_negative(amount: Money) -> Money {
    if amount.is_negative() {
        Money::zero()
    } else {
        amount
    }
}

/// Fee plus item prices, or `None` on overflow.
fn computed_total(delivery_fee: Money, items: &[MenuItem]) -> Option<Money> {
    Money::checked_sum(items.iter().map(|p| p.price))?.checked_add(delivery_fee)
}

// =============================================================================
// Deserialization
// =============================================================================

/// Wire shape of an [`Order`]. The stored total is read but never trusted.
#[derive(Deserialize)]
struct OrderRecord {
    id: String,
    customer_id: String,
    restaurant_id: String,
    items: Vec<MenuItem>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    #[serde(default)]
    note: String,
    delivery_fee: Money,
    #[allow(dead_code)]
    total: Money,
}

impl<'de> Deserialize<'de> for Order {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = OrderRecord::deserialize(deserializer)?;
        if record.delivery_fee.is_negative() {
            return Err(serde::de::Error::custom(format!(
                "order {} has negative delivery fee {}",
                record.id, record.delivery_fee
            )));
        }
        let total = computed_total(record.delivery_fee, &record.items).ok_or_else(|| {
            serde::de::Error::custom(format!("order {} total overflows", record.id))
        })?;

        Ok(Order {
            id: record.id,
            customer_id: record.customer_id,
            restaurant_id: record.restaurant_id,
            items: record.items,
            status: record.status,
            created_at: record.created_at,
            note: record.note,
            delivery_fee: record.delivery_fee,
            total,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, cents: i64) -> MenuItem {
        MenuItem::new(id, name, "", Money::from_cents(cents), "Food", "REST001")
    }

    fn assert_total_invariant(order: &Order) {
        let expected: Money =
            order.items().iter().map(|p| p.price).sum::<Money>() + order.delivery_fee();
        assert_eq!(order.total(), expected);
    }

    #[test]
    fn test_new_order_defaults() {
        let order = Order::new("PED001", "CLI001", "REST001", Money::from_cents(500));
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.total(), Money::from_cents(500));
        assert!(order.note().is_empty());
        assert!(!order.is_valid());
    }

    #[test]
    fn test_draft_generates_unique_ids() {
        let a = Order::draft("CLI001", "REST001", Money::zero());
        let b = Order::draft("CLI001", "REST001", Money::zero());
        assert_ne!(a.id(), b.id());
        assert!(Uuid::parse_str(a.id()).is_ok());
    }

    #[test]
    fn test_total_scenario() {
        let mut order = Order::new("PED001", "CLI001", "REST001", Money::from_cents(500));
        assert!(order.add_item(&item("PROD001", "Pizza Margherita", 3500)));
        assert!(order.add_item(&item("PROD004", "Soda 2L", 800)));

        assert_eq!(order.subtotal(), Money::from_cents(4300));
        assert_eq!(order.total(), Money::from_cents(4800));
        assert!(order.is_valid());
    }

    #[test]
    fn test_inactive_item_ignored() {
        let mut order = Order::new("PED001", "CLI001", "REST001", Money::from_cents(500));
        let mut sold_out = item("PROD002", "Pepperoni", 3800);
        sold_out.active = false;

        assert!(!order.add_item(&sold_out));
        assert_eq!(order.item_count(), 0);
        assert_eq!(order.total(), Money::from_cents(500));
    }

    #[test]
    fn test_negative_fee_clamped() {
        let order = Order::new("PED001", "CLI001", "REST001", Money::from_cents(-500));
        assert_eq!(order.delivery_fee(), Money::zero());
        assert_eq!(order.total(), Money::zero());
    }

    #[test]
    fn test_add_item_refuses_overflow() {
        let mut order = Order::new("PED001", "CLI001", "REST001", Money::from_cents(500));
        assert!(order.add_item(&item("BIG", "Banquet", i64::MAX - 500)));
        assert_eq!(order.total(), Money::from_cents(i64::MAX));

        assert!(!order.add_item(&item("PROD004", "Soda 2L", 800)));
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total(), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_deserialize_recomputes_total() {
        let mut order = Order::new("PED001", "CLI001", "REST001", Money::from_cents(500));
        order.add_item(&item("PROD001", "Pizza Margherita", 3500));

        let json = serde_json::to_string(&order).unwrap();
        let forged = json.replace("\"total\":4000", "\"total\":1");
        assert_ne!(json, forged);

        let loaded: Order = serde_json::from_str(&forged).unwrap();
        assert_eq!(loaded.total(), Money::from_cents(4000));
        assert_eq!(loaded, order);
    }

    #[test]
    fn test_deserialize_rejects_negative_fee() {
        let order = Order::new("PED001", "CLI001", "REST001", Money::from_cents(500));
        let json = serde_json::to_string(&order)
            .unwrap()
            .replace("\"delivery_fee\":500", "\"delivery_fee\":-500");

        let err = serde_json::from_str::<Order>(&json).unwrap_err();
        assert!(err.to_string().contains("negative delivery fee"));
    }

    #[test]
    fn test_remove_item() {
        let mut order = Order::new("PED001", "CLI001", "REST001", Money::from_cents(500));
        order.add_item(&item("PROD001", "Pizza", 3500));
        order.add_item(&item("PROD004", "Soda", 800));

        let removed = order.remove_item(0).unwrap();
        assert_eq!(removed.id, "PROD001");
        assert_eq!(order.total(), Money::from_cents(1300));

        let err = order.remove_item(5).unwrap_err();
        assert!(matches!(err, CoreError::ItemIndexOutOfRange { index: 5, len: 1 }));
        assert_eq!(order.total(), Money::from_cents(1300));
    }

    #[test]
    fn test_total_invariant_over_sequence() {
        let mut order = Order::new("PED001", "CLI001", "REST001", Money::from_cents(350));
        let menu = [
            item("A", "A", 1800),
            item("B", "B", 2800),
            item("C", "C", 1000),
            item("D", "D", 1200),
        ];

        for p in &menu {
            order.add_item(p);
            assert_total_invariant(&order);
        }

        let _ = order.remove_item(1);
        assert_total_invariant(&order);
        let _ = order.remove_item(10);
        assert_total_invariant(&order);
        let _ = order.remove_item(0);
        assert_total_invariant(&order);
        order.add_item(&menu[3]);
        assert_total_invariant(&order);
    }

    #[test]
    fn test_snapshot_not_affected_by_menu_edit() {
        let mut menu_item = item("PROD001", "Pizza", 3500);
        let mut order = Order::new("PED001", "CLI001", "REST001", Money::zero());
        order.add_item(&menu_item);

        menu_item.set_price(Money::from_cents(9900));
        menu_item.name = "Renamed".to_string();

        assert_eq!(order.items()[0].price, Money::from_cents(3500));
        assert_eq!(order.items()[0].name, "Pizza");
        assert_eq!(order.total(), Money::from_cents(3500));
    }

    #[test]
    fn test_zero_total_is_invalid() {
        // Only reachable with a corrupt zero-priced snapshot and no fee.
        let mut free = item("FREE", "Water", 100);
        free.price = Money::zero();
        let mut order = Order::new("PED001", "CLI001", "REST001", Money::zero());
        order.add_item(&free);

        assert_eq!(order.item_count(), 1);
        assert!(!order.is_valid());
    }

    #[test]
    fn test_status_progression() {
        let mut status = OrderStatus::Pending;
        let mut path = vec![status];
        while let Some(next) = status.next() {
            status = next;
            path.push(status);
        }
        assert_eq!(
            path,
            vec![
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Delivered,
            ]
        );
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Cancelled.next().is_none());
        assert!(!OrderStatus::Ready.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).unwrap(),
            "\"preparing\""
        );
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(OrderStatus::ALL.len(), 6);
    }

    #[test]
    fn test_details_lists_items_and_totals() {
        let mut order = Order::new("PED001", "CLI001", "REST001", Money::from_cents(500));
        order.add_item(&item("PROD001", "Pizza Margherita", 3500));
        order.add_item(&item("PROD004", "Soda 2L", 800));
        order.set_note("No onions");

        let details = order.details();
        assert!(details.contains("Order PED001"));
        assert!(details.contains("Status: Pending"));
        assert!(details.contains("  1. Pizza Margherita - $35.00"));
        assert!(details.contains("  2. Soda 2L - $8.00"));
        assert!(details.contains("Subtotal: $43.00"));
        assert!(details.contains("Delivery: $5.00"));
        assert!(details.contains("TOTAL: $48.00"));
        assert!(details.contains("Note: No onions"));
    }
}
