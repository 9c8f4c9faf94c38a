//! # First-Run Bootstrap
//!
//! Seeds demo data the first time a data directory is used.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  initialize(&mut manager)                                               │
//! │       │                                                                 │
//! │       ├── marker present? ──► Ok(false), nothing touched               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  seed_demo_data  ← 2 customers, 3 restaurants, 15 menu items           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mark_initialized ──► Ok(true)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use comanda_core::{Contact, Credentials, Customer, MenuItem, Money, Restaurant};
use tracing::{debug, info};

use crate::error::{ManagerError, ManagerResult};
use crate::manager::OrderManager;
use crate::store::SnapshotStore;

/// (id, name, email, password, phone, address, document, credit in cents)
const CUSTOMERS: &[(&str, &str, &str, &str, &str, &str, &str, i64)] = &[
    (
        "CLI001",
        "João Silva",
        "joao@email.com",
        "senha123",
        "(11) 99999-0001",
        "Rua A, 123",
        "123.456.789-00",
        50000,
    ),
    (
        "CLI002",
        "Maria Santos",
        "maria@email.com",
        "senha456",
        "(11) 99999-0002",
        "Rua B, 456",
        "987.654.321-00",
        30000,
    ),
];

/// (id, name, email, password, phone, address, document, category, fee in cents)
const RESTAURANTS: &[(&str, &str, &str, &str, &str, &str, &str, &str, i64)] = &[
    (
        "REST001",
        "Pizza Delícia",
        "pizza@email.com",
        "senha123",
        "(11) 3333-0001",
        "Av. Principal, 100",
        "12.345.678/0001-00",
        "Pizzeria",
        500,
    ),
    (
        "REST002",
        "Burguer Master",
        "burger@email.com",
        "senha456",
        "(11) 3333-0002",
        "Av. Comercial, 200",
        "87.654.321/0001-00",
        "Burgers",
        350,
    ),
    (
        "REST003",
        "Comida Árabe",
        "arabe@email.com",
        "senha789",
        "(11) 3333-0003",
        "Rua Oriente, 300",
        "11.111.111/0001-00",
        "Middle Eastern",
        400,
    ),
];

/// (id, name, description, price in cents, category, restaurant id)
const MENU: &[(&str, &str, &str, i64, &str, &str)] = &[
    ("PROD001", "Pizza Margherita", "Tomato, mozzarella and basil", 3500, "Pizza", "REST001"),
    ("PROD002", "Pizza Pepperoni", "Pepperoni and cheese", 3800, "Pizza", "REST001"),
    ("PROD003", "Vegetarian Pizza", "Assorted vegetables", 3200, "Pizza", "REST001"),
    ("PROD004", "Soda 2L", "Cola or guaraná", 800, "Drink", "REST001"),
    ("PROD005", "Mixed Salad", "Lettuce, tomato and carrot", 1200, "Starter", "REST001"),
    ("PROD006", "Classic Burger", "Bun, patty and lettuce", 1800, "Burger", "REST002"),
    ("PROD007", "Double Burger", "Double patty with cheese", 2800, "Burger", "REST002"),
    ("PROD008", "Large Fries", "Crispy fries", 1000, "Side", "REST002"),
    ("PROD009", "Milkshake", "Chocolate, strawberry or vanilla", 1200, "Drink", "REST002"),
    ("PROD010", "Ice Cream", "Pick a flavor", 800, "Dessert", "REST002"),
    ("PROD011", "Kebab", "Meat skewer with pita", 2200, "Main", "REST003"),
    ("PROD012", "Kibbeh", "Bulgur and meat croquette", 1400, "Starter", "REST003"),
    ("PROD013", "Hummus", "Chickpea dip", 1000, "Starter", "REST003"),
    ("PROD014", "Mint Tea", "Traditional tea", 600, "Drink", "REST003"),
    ("PROD015", "Baklava", "Honey pastry", 1100, "Dessert", "REST003"),
];

/// Counts of what a seed run actually added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub customers: usize,
    pub restaurants: usize,
    pub menu_items: usize,
}

/// Registers the demo customers, restaurants and menus.
///
/// Accounts whose id or email already exists are skipped, so running this
/// twice is harmless.
pub fn seed_demo_data(manager: &mut OrderManager) -> ManagerResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    for &(id, name, email, password, phone, address, document, credit) in CUSTOMERS {
        let credentials = Credentials::new(email, password)?;
        let mut customer = Customer::new(id, name, credentials, Contact::new(phone, address), document);
        customer.add_credit(Money::from_cents(credit));

        if skip_existing(manager.register_customer(customer), id)? {
            summary.customers += 1;
        }
    }

    for &(id, name, email, password, phone, address, document, category, fee) in RESTAURANTS {
        let credentials = Credentials::new(email, password)?;
        let mut restaurant = Restaurant::new(
            id,
            name,
            credentials,
            Contact::new(phone, address),
            document,
            category,
            Money::from_cents(fee),
        );

        let mut items = 0;
        for &(item_id, item_name, description, price, item_category, owner) in MENU {
            if owner == id {
                let item = MenuItem::new(item_id, item_name, description, Money::from_cents(price), item_category, owner);
                if restaurant.add_menu_item(item) {
                    items += 1;
                }
            }
        }

        if skip_existing(manager.register_restaurant(restaurant), id)? {
            summary.restaurants += 1;
            summary.menu_items += items;
        }
    }

    info!(
        customers = summary.customers,
        restaurants = summary.restaurants,
        menu_items = summary.menu_items,
        "Demo data seeded"
    );
    Ok(summary)
}

/// Ok(true) when registered, Ok(false) when the account already existed.
fn skip_existing(result: ManagerResult<()>, id: &str) -> ManagerResult<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(ManagerError::DuplicateId { .. }) | Err(ManagerError::EmailTaken { .. }) => {
            debug!(id = %id, "Seed account already present, skipping");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Seeds demo data unless the store is already marked initialized.
///
/// Returns true when seeding ran.
pub fn initialize(manager: &mut OrderManager) -> ManagerResult<bool> {
    if manager.store().is_initialized() {
        debug!("Storage already initialized");
        return Ok(false);
    }

    info!(path = %manager.store().base_dir().display(), "First run, seeding demo data");
    seed_demo_data(manager)?;
    manager.store().mark_initialized()?;
    Ok(true)
}

/// Deletes every snapshot and the marker. Intended for development only.
pub fn reset(store: &SnapshotStore) {
    store.reset();
}
