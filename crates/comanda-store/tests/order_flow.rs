//! # Order Flow Integration Tests
//!
//! End-to-end scenarios against a real data directory: seed, log in, place
//! orders, move them through statuses, reopen from disk.
//!
//! Each test gets a fresh temporary directory via `tempfile::TempDir`.

use comanda_core::{
    Account, Contact, Credentials, Customer, MenuItem, Money, Order, OrderStatus, Role,
};
use comanda_store::{bootstrap, Collection, ManagerError, OrderManager, SnapshotStore, StoreConfig};
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

fn open(dir: &TempDir) -> OrderManager {
    let store = SnapshotStore::new(StoreConfig::new(dir.path()));
    OrderManager::open(store).expect("Failed to open manager")
}

fn seeded() -> (TempDir, OrderManager) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut manager = open(&dir);
    assert!(bootstrap::initialize(&mut manager).unwrap());
    (dir, manager)
}

/// Pizza Margherita (35.00) + Soda 2L (8.00) from Pizza Delícia (fee 5.00).
fn pizza_and_soda(manager: &OrderManager, order_id: &str, customer_id: &str) -> Order {
    let restaurant = manager.restaurant("REST001").unwrap();
    let mut order = Order::new(order_id, customer_id, "REST001", restaurant.delivery_fee());
    assert!(order.add_item(restaurant.menu_item("PROD001").unwrap()));
    assert!(order.add_item(restaurant.menu_item("PROD004").unwrap()));
    order
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_customer_places_order() {
    let (_dir, mut manager) = seeded();

    let session = manager
        .authenticate("joao@email.com", "senha123", Role::Customer)
        .unwrap();
    assert_eq!(session.actor_id, "CLI001");

    let order = pizza_and_soda(&manager, "PED001", &session.actor_id);
    let placed = manager.create_order(order).unwrap();
    assert_eq!(placed.total(), Money::from_cents(4800));

    let joao = manager.customer("CLI001").unwrap();
    assert_eq!(joao.credit(), Money::from_cents(45200));
    assert!(joao.has_order("PED001"));

    let pizzeria = manager.restaurant("REST001").unwrap();
    assert_eq!(pizzeria.received_order_ids(), &["PED001".to_string()]);
}

#[test]
fn test_insufficient_credit_creates_nothing() {
    let (_dir, mut manager) = seeded();

    let credentials = Credentials::new("pedro@email.com", "senha000").unwrap();
    let mut pedro = Customer::new("CLI003", "Pedro Alves", credentials, Contact::default(), "");
    pedro.add_credit(Money::from_cents(1000));
    manager.register_customer(pedro).unwrap();

    let order = pizza_and_soda(&manager, "PED001", "CLI003");
    let err = manager.create_order(order).unwrap_err();
    assert!(matches!(err, ManagerError::InsufficientCredit { .. }));
    assert!(err.is_order_rejection());

    assert_eq!(
        manager.customer("CLI003").unwrap().credit(),
        Money::from_cents(1000)
    );
    assert!(manager.order("PED001").is_none());
    assert!(manager.customer_orders("CLI003").unwrap().is_empty());
    assert!(manager.restaurant_orders("REST001").unwrap().is_empty());
}

#[test]
fn test_restaurant_advances_order() {
    let (_dir, mut manager) = seeded();
    let order = pizza_and_soda(&manager, "PED001", "CLI001");
    manager.create_order(order).unwrap();

    let session = manager
        .authenticate("pizza@email.com", "senha123", Role::Restaurant)
        .unwrap();
    let received = manager.restaurant_orders(&session.actor_id).unwrap();
    assert_eq!(received.len(), 1);

    let mut status = received[0].status();
    while let Some(next) = status.next() {
        manager.update_order_status("PED001", next).unwrap();
        status = next;
    }
    assert_eq!(status, OrderStatus::Delivered);

    let seen_by_customer = manager.customer_orders("CLI001").unwrap();
    assert_eq!(seen_by_customer[0].status(), OrderStatus::Delivered);
}

#[test]
fn test_unknown_order_status_update() {
    let (_dir, mut manager) = seeded();
    let before = manager.all_orders();

    let err = manager
        .update_order_status("PED404", OrderStatus::Confirmed)
        .unwrap_err();
    assert!(matches!(err, ManagerError::NotFound { .. }));
    assert_eq!(manager.all_orders(), before);
}

#[test]
fn test_state_round_trips_through_disk() {
    let (dir, mut manager) = seeded();
    let order = pizza_and_soda(&manager, "PED001", "CLI002");
    manager.create_order(order).unwrap();
    manager
        .update_order_status("PED001", OrderStatus::Preparing)
        .unwrap();

    let customers = manager.all_customers();
    let restaurants = manager.all_restaurants();
    let orders = manager.all_orders();
    drop(manager);

    let mut reopened = open(&dir);
    assert_eq!(reopened.all_customers(), customers);
    assert_eq!(reopened.all_restaurants(), restaurants);
    assert_eq!(reopened.all_orders(), orders);

    let maria = reopened
        .authenticate("maria@email.com", "senha456", Role::Customer)
        .unwrap();
    assert_eq!(maria.actor_name, "Maria Santos");
    assert_eq!(
        reopened.customer("CLI002").unwrap().credit(),
        Money::from_cents(25200)
    );
}

#[test]
fn test_menu_catalog_written() {
    let (_dir, manager) = seeded();
    let store = manager.store();

    assert!(store.all_files_present());
    let catalog: Vec<MenuItem> = store.load(Collection::MenuItems).unwrap();
    assert_eq!(catalog.len(), 15);
}

#[test]
fn test_missing_directory_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(StoreConfig::new(dir.path().join("never-created")));

    let orders: Vec<Order> = store.load(Collection::Orders).unwrap();
    assert!(orders.is_empty());

    let manager = OrderManager::open(store).unwrap();
    assert!(manager.all_customers().is_empty());
    assert!(!manager.store().is_initialized());
}

#[test]
fn test_wrong_password_is_rejected() {
    let (_dir, mut manager) = seeded();

    let err = manager
        .authenticate("joao@email.com", "senha456", Role::Customer)
        .unwrap_err();
    assert!(matches!(err, ManagerError::Authentication));
    assert!(manager.current_session().is_none());

    let joao = manager.customer("CLI001").unwrap();
    assert!(joao.verify("JOAO@email.com ", "senha123"));
}
