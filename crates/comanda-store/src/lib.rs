//! # comanda-store: Persistence & Transactions for Comanda
//!
//! The order manager, the file snapshot store behind it, and first-run seeding.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        comanda-store                                    │
//! │                                                                         │
//! │   UI / CLI                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ┌───────────────────────┐      ┌──────────────────────────────────┐  │
//! │  │     OrderManager      │      │           bootstrap              │  │
//! │  │  customers            │◄─────│  initialize / seed_demo_data     │  │
//! │  │  restaurants          │      └──────────────────────────────────┘  │
//! │  │  orders (master list) │                                             │
//! │  │  session              │                                             │
//! │  └──────────┬────────────┘                                             │
//! │             │ full snapshot after each mutation                        │
//! │             ▼                                                           │
//! │  ┌───────────────────────┐      ┌──────────────────────────────────┐  │
//! │  │    SnapshotStore      │◄─────│  StoreConfig (env / builder)     │  │
//! │  │  atomic JSON files    │      └──────────────────────────────────┘  │
//! │  └───────────────────────┘                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use comanda_store::{bootstrap, OrderManager, SnapshotStore, StoreConfig};
//! use comanda_core::Role;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SnapshotStore::new(StoreConfig::from_env()?);
//! let mut manager = OrderManager::open(store)?;
//! bootstrap::initialize(&mut manager)?;
//!
//! let session = manager.authenticate("joao@email.com", "senha123", Role::Customer)?;
//! println!("Logged in as {}", session.actor_name);
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod manager;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use error::{ManagerError, ManagerResult, StoreError, StoreResult};
pub use manager::OrderManager;
pub use store::{Collection, SnapshotStore};
