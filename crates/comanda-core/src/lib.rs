//! # comanda-core: Entity Model for Comanda
//!
//! Customers, restaurants, menu items and orders, with the rules that keep them
//! consistent. Pure types with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comanda Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI (external collaborator)                   │   │
//! │  │    Login ──► Menu ──► Order builder ──► Order status           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          comanda-store: OrderManager + SnapshotStore            │   │
//! │  │    register, authenticate, create_order, update_order_status   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ comanda-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ customer  │  │restaurant │  │   order   │  │   money   │  │   │
//! │  │   │  credit   │  │   menu    │  │  totals   │  │   cents   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO LOGGING                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`account`] - Credentials, roles, sessions and the `Account` trait
//! - [`customer`] - Customer with guarded credit balance
//! - [`restaurant`] - Restaurant with menu and delivery fee
//! - [`menu`] - Menu items
//! - [`order`] - Orders and order status
//! - [`money`] - Integer-cents money type
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use comanda_core::{MenuItem, Money, Order};
//!
//! let pizza = MenuItem::new("PROD001", "Pizza Margherita", "", Money::from_cents(3500), "Pizza", "REST001");
//! let soda = MenuItem::new("PROD004", "Soda 2L", "", Money::from_cents(800), "Drink", "REST001");
//!
//! let mut order = Order::new("PED001", "CLI001", "REST001", Money::from_cents(500));
//! order.add_item(&pizza);
//! order.add_item(&soda);
//!
//! assert_eq!(order.total(), Money::from_cents(4800));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod account;
pub mod customer;
pub mod error;
pub mod menu;
pub mod money;
pub mod order;
pub mod restaurant;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use account::{Account, Contact, Credentials, Role, Session};
pub use customer::Customer;
pub use error::{CoreError, CoreResult, ValidationError};
pub use menu::MenuItem;
pub use money::Money;
pub use order::{Order, OrderStatus};
pub use restaurant::Restaurant;
