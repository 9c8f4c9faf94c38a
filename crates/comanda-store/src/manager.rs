//! # Order Manager
//!
//! Single entry point for every state change: registration, login, order
//! placement and status updates. Owns the three aggregate collections and
//! saves a full snapshot after each successful mutation.
//!
//! ## Order Placement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      create_order(order)                                │
//! │                                                                         │
//! │  1. order.is_valid()?              no ──► InvalidOrder                 │
//! │  2. order id unused?               no ──► DuplicateId                  │
//! │  3. customer + restaurant exist?   no ──► NotFound                     │
//! │        ─── nothing mutated above this line ───                         │
//! │  4. customer.debit_credit(total)   no ──► InsufficientCredit           │
//! │  5. customer.attach_order(id)                                          │
//! │     restaurant.receive_order(id)                                       │
//! │     orders.push(order)                                                 │
//! │  6. save snapshot                  fail ──► Storage (memory kept,      │
//! │                                              is_dirty() == true)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Order Sharing
//! Customers and restaurants hold order ids, not orders. The manager's master
//! list is the only place an `Order` lives, so a status change is visible from
//! both sides without any copying.

use comanda_core::{
    Account, CoreError, Customer, MenuItem, Money, Order, OrderStatus, Restaurant, Role, Session,
    ValidationError,
};
use tracing::{debug, error, info, warn};

use crate::error::{ManagerError, ManagerResult, StoreError};
use crate::store::{Collection, SnapshotStore};

/// Owns all aggregates and the login session.
#[derive(Debug)]
pub struct OrderManager {
    store: SnapshotStore,
    customers: Vec<Customer>,
    restaurants: Vec<Restaurant>,
    orders: Vec<Order>,
    session: Option<Session>,
    dirty: bool,
}

impl OrderManager {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Prepares the storage directory and loads every collection.
    ///
    /// Missing files load as empty collections.
    pub fn open(store: SnapshotStore) -> ManagerResult<Self> {
        store.ensure_storage_ready()?;

        let customers: Vec<Customer> = store.load(Collection::Customers)?;
        let restaurants: Vec<Restaurant> = store.load(Collection::Restaurants)?;
        let orders: Vec<Order> = store.load(Collection::Orders)?;

        let manager = OrderManager {
            store,
            customers,
            restaurants,
            orders,
            session: None,
            dirty: false,
        };
        manager.warn_dangling_orders();

        info!(
            path = %manager.store.base_dir().display(),
            customers = manager.customers.len(),
            restaurants = manager.restaurants.len(),
            orders = manager.orders.len(),
            "Order manager loaded"
        );
        Ok(manager)
    }

    fn warn_dangling_orders(&self) {
        for customer in &self.customers {
            for order_id in customer.order_ids() {
                if self.find_order(order_id).is_none() {
                    warn!(customer_id = %customer.id(), order_id = %order_id, "Customer references unknown order");
                }
            }
        }
        for restaurant in &self.restaurants {
            for order_id in restaurant.received_order_ids() {
                if self.find_order(order_id).is_none() {
                    warn!(restaurant_id = %restaurant.id(), order_id = %order_id, "Restaurant references unknown order");
                }
            }
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Saves every collection.
    ///
    /// Call after a `Storage` error to retry once the disk problem is fixed.
    pub fn persist(&mut self) -> ManagerResult<()> {
        match self.write_snapshot() {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Snapshot save failed; in-memory state is ahead of disk");
                self.dirty = true;
                Err(e.into())
            }
        }
    }

    /// True when the last save failed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn write_snapshot(&self) -> Result<(), StoreError> {
        self.store.save(Collection::Customers, &self.customers)?;
        self.store.save(Collection::Restaurants, &self.restaurants)?;
        self.store.save(Collection::MenuItems, &self.menu_catalog())?;
        self.store.save(Collection::Orders, &self.orders)?;
        Ok(())
    }

    /// Every restaurant's menu in one list.
    fn menu_catalog(&self) -> Vec<&MenuItem> {
        self.restaurants.iter().flat_map(|r| r.menu()).collect()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a new customer and saves.
    pub fn register_customer(&mut self, customer: Customer) -> ManagerResult<()> {
        customer.validate()?;
        if self.find_customer(customer.id()).is_some() {
            return Err(ManagerError::duplicate("Customer", customer.id()));
        }
        ensure_email_free(&self.customers, customer.email())?;

        info!(customer_id = %customer.id(), "Customer registered");
        self.customers.push(customer);
        self.persist()
    }

    /// Registers a new restaurant and saves.
    pub fn register_restaurant(&mut self, restaurant: Restaurant) -> ManagerResult<()> {
        restaurant.validate()?;
        if self.find_restaurant(restaurant.id()).is_some() {
            return Err(ManagerError::duplicate("Restaurant", restaurant.id()));
        }
        ensure_email_free(&self.restaurants, restaurant.email())?;

        info!(restaurant_id = %restaurant.id(), "Restaurant registered");
        self.restaurants.push(restaurant);
        self.persist()
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Logs in the first account of `role` whose credentials match.
    ///
    /// Replaces any existing session.
    pub fn authenticate(&mut self, email: &str, password: &str, role: Role) -> ManagerResult<Session> {
        let session = match role {
            Role::Customer => find_account(&self.customers, email, password),
            Role::Restaurant => find_account(&self.restaurants, email, password),
        };

        match session {
            Some(session) => {
                info!(actor_id = %session.actor_id, role = session.role.label(), "Login succeeded");
                self.session = Some(session.clone());
                Ok(session)
            }
            None => {
                warn!(role = role.label(), "Login failed");
                Err(ManagerError::Authentication)
            }
        }
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The current session, or `NotAuthenticated`.
    pub fn require_session(&self) -> ManagerResult<&Session> {
        self.session.as_ref().ok_or(ManagerError::NotAuthenticated)
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!(actor_id = %session.actor_id, "Logged out");
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Places an order: debits the customer, links the order to both parties
    /// and saves.
    ///
    /// Either every step happens or none does, except that a failed save keeps
    /// the in-memory result (see [`OrderManager::is_dirty`]).
    pub fn create_order(&mut self, order: Order) -> ManagerResult<Order> {
        let order_id = order.id().to_string();
        self.place_order(order).inspect_err(|e| {
            if e.is_order_rejection() {
                warn!(order_id = %order_id, error = %e, "Order rejected");
            }
        })
    }

    fn place_order(&mut self, order: Order) -> ManagerResult<Order> {
        if !order.is_valid() {
            let reason = if order.item_count() == 0 {
                "order has no items".to_string()
            } else {
                format!("order total {} must be positive", order.total())
            };
            return Err(ManagerError::InvalidOrder(reason));
        }
        if self.find_order(order.id()).is_some() {
            return Err(ManagerError::duplicate("Order", order.id()));
        }

        let customer_idx = self.customer_index(order.customer_id())?;
        let restaurant_idx = self.restaurant_index(order.restaurant_id())?;

        let customer = &mut self.customers[customer_idx];
        let balance = customer
            .debit_credit(order.total())
            .map_err(|e| match e {
                CoreError::InsufficientCredit { balance, requested } => {
                    ManagerError::InsufficientCredit {
                        balance,
                        required: requested,
                    }
                }
                other => ManagerError::Core(other),
            })?;
        customer.attach_order(order.id());
        self.restaurants[restaurant_idx].receive_order(order.id());

        info!(
            order_id = %order.id(),
            customer_id = %order.customer_id(),
            restaurant_id = %order.restaurant_id(),
            total = %order.total(),
            balance = %balance,
            "Order placed"
        );
        self.orders.push(order.clone());
        self.persist()?;
        Ok(order)
    }

    /// Sets an order's status and saves. Any status may follow any other.
    pub fn update_order_status(&mut self, order_id: &str, status: OrderStatus) -> ManagerResult<()> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id() == order_id)
            .ok_or_else(|| ManagerError::not_found("Order", order_id))?;

        let previous = order.status();
        if previous.is_terminal() && previous != status {
            warn!(order_id = %order_id, from = %previous, to = %status, "Order leaves a final status");
        }
        order.set_status(status);
        debug!(order_id = %order_id, from = %previous, to = %status, "Order status updated");

        self.persist()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn customer(&self, id: &str) -> Option<Customer> {
        self.find_customer(id).cloned()
    }

    pub fn restaurant(&self, id: &str) -> Option<Restaurant> {
        self.find_restaurant(id).cloned()
    }

    pub fn order(&self, id: &str) -> Option<Order> {
        self.find_order(id).cloned()
    }

    pub fn active_customers(&self) -> Vec<Customer> {
        self.customers.iter().filter(|c| c.is_active()).cloned().collect()
    }

    pub fn all_customers(&self) -> Vec<Customer> {
        self.customers.clone()
    }

    pub fn open_restaurants(&self) -> Vec<Restaurant> {
        self.restaurants.iter().filter(|r| r.is_open()).cloned().collect()
    }

    pub fn all_restaurants(&self) -> Vec<Restaurant> {
        self.restaurants.clone()
    }

    pub fn all_orders(&self) -> Vec<Order> {
        self.orders.clone()
    }

    /// Orders placed by a customer, oldest first.
    pub fn customer_orders(&self, customer_id: &str) -> ManagerResult<Vec<Order>> {
        let customer = self
            .find_customer(customer_id)
            .ok_or_else(|| ManagerError::not_found("Customer", customer_id))?;
        Ok(self.resolve_orders(customer.order_ids()))
    }

    /// Orders received by a restaurant, oldest first.
    pub fn restaurant_orders(&self, restaurant_id: &str) -> ManagerResult<Vec<Order>> {
        let restaurant = self
            .find_restaurant(restaurant_id)
            .ok_or_else(|| ManagerError::not_found("Restaurant", restaurant_id))?;
        Ok(self.resolve_orders(restaurant.received_order_ids()))
    }

    fn resolve_orders(&self, ids: &[String]) -> Vec<Order> {
        ids.iter()
            .filter_map(|id| self.find_order(id))
            .cloned()
            .collect()
    }

    // =========================================================================
    // Account Mutations
    // =========================================================================

    /// Tops up a customer's credit. Returns the new balance.
    pub fn add_credit(&mut self, customer_id: &str, amount: Money) -> ManagerResult<Money> {
        if !amount.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: "credit amount".to_string(),
            }
            .into());
        }
        let idx = self.customer_index(customer_id)?;
        let customer = &mut self.customers[idx];
        if !customer.add_credit(amount) {
            return Err(CoreError::InvalidAmount { amount }.into());
        }
        let balance = customer.credit();

        info!(customer_id = %customer_id, amount = %amount, balance = %balance, "Credit added");
        self.persist()?;
        Ok(balance)
    }

    pub fn set_customer_active(&mut self, customer_id: &str, active: bool) -> ManagerResult<()> {
        let idx = self.customer_index(customer_id)?;
        self.customers[idx].set_active(active);
        debug!(customer_id = %customer_id, active, "Customer active flag changed");
        self.persist()
    }

    pub fn set_restaurant_open(&mut self, restaurant_id: &str, open: bool) -> ManagerResult<()> {
        let idx = self.restaurant_index(restaurant_id)?;
        self.restaurants[idx].set_open(open);
        debug!(restaurant_id = %restaurant_id, open, "Restaurant open flag changed");
        self.persist()
    }

    pub fn set_delivery_fee(&mut self, restaurant_id: &str, fee: Money) -> ManagerResult<()> {
        let idx = self.restaurant_index(restaurant_id)?;
        if !self.restaurants[idx].set_delivery_fee(fee) {
            return Err(ValidationError::Negative {
                field: "delivery fee".to_string(),
            }
            .into());
        }
        debug!(restaurant_id = %restaurant_id, fee = %fee, "Delivery fee changed");
        self.persist()
    }

    // =========================================================================
    // Menu Mutations
    // =========================================================================

    /// Adds an item to a restaurant's menu. Returns false if the id is
    /// already on that menu.
    pub fn add_menu_item(&mut self, restaurant_id: &str, item: MenuItem) -> ManagerResult<bool> {
        item.validate()?;
        if item.restaurant_id != restaurant_id {
            return Err(ValidationError::InvalidFormat {
                field: "restaurant id".to_string(),
                reason: format!("item belongs to '{}'", item.restaurant_id),
            }
            .into());
        }

        let idx = self.restaurant_index(restaurant_id)?;
        let item_id = item.id.clone();
        if !self.restaurants[idx].add_menu_item(item) {
            debug!(restaurant_id = %restaurant_id, item_id = %item_id, "Menu item already present");
            return Ok(false);
        }

        debug!(restaurant_id = %restaurant_id, item_id = %item_id, "Menu item added");
        self.persist()?;
        Ok(true)
    }

    /// Removes an item from a restaurant's menu. Past orders keep their copy.
    pub fn remove_menu_item(&mut self, restaurant_id: &str, item_id: &str) -> ManagerResult<MenuItem> {
        let idx = self.restaurant_index(restaurant_id)?;
        let removed = self.restaurants[idx]
            .remove_menu_item(item_id)
            .ok_or_else(|| ManagerError::not_found("Menu item", item_id))?;

        debug!(restaurant_id = %restaurant_id, item_id = %item_id, "Menu item removed");
        self.persist()?;
        Ok(removed)
    }

    pub fn set_menu_item_active(
        &mut self,
        restaurant_id: &str,
        item_id: &str,
        active: bool,
    ) -> ManagerResult<()> {
        let item = self.menu_item_mut(restaurant_id, item_id)?;
        item.active = active;
        debug!(restaurant_id = %restaurant_id, item_id = %item_id, active, "Menu item active flag changed");
        self.persist()
    }

    pub fn set_menu_item_price(
        &mut self,
        restaurant_id: &str,
        item_id: &str,
        price: Money,
    ) -> ManagerResult<()> {
        let item = self.menu_item_mut(restaurant_id, item_id)?;
        if !item.set_price(price) {
            return Err(ValidationError::MustBePositive {
                field: "price".to_string(),
            }
            .into());
        }
        debug!(restaurant_id = %restaurant_id, item_id = %item_id, price = %price, "Menu item repriced");
        self.persist()
    }

    fn menu_item_mut(&mut self, restaurant_id: &str, item_id: &str) -> ManagerResult<&mut MenuItem> {
        let idx = self.restaurant_index(restaurant_id)?;
        self.restaurants[idx]
            .menu_item_mut(item_id)
            .ok_or_else(|| ManagerError::not_found("Menu item", item_id))
    }

    // =========================================================================
    // Lookup Helpers
    // =========================================================================

    fn find_customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id() == id)
    }

    fn find_restaurant(&self, id: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id() == id)
    }

    fn find_order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id() == id)
    }

    fn customer_index(&self, id: &str) -> ManagerResult<usize> {
        self.customers
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| ManagerError::not_found("Customer", id))
    }

    fn restaurant_index(&self, id: &str) -> ManagerResult<usize> {
        self.restaurants
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ManagerError::not_found("Restaurant", id))
    }
}

fn find_account<A: Account>(accounts: &[A], email: &str, password: &str) -> Option<Session> {
    accounts
        .iter()
        .find(|a| a.verify(email, password))
        .map(|a| a.start_session())
}

fn ensure_email_free<A: Account>(accounts: &[A], email: &str) -> ManagerResult<()> {
    if accounts.iter().any(|a| a.email() == email) {
        return Err(ManagerError::EmailTaken {
            email: email.to_string(),
        });
    }
    Ok(())
}
