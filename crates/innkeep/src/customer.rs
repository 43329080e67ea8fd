//! Customer records and their repository.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{InnkeepError, Result};
use crate::reservation::{RESERVATIONS_FILE, Reservation};
use crate::store::{StorageBackend, Store};

pub(crate) const CUSTOMERS_FILE: &str = "customers.json";

/// A customer who can hold reservations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub name: String,
    pub email: String,
}

/// CRUD operations over the customer store.
pub struct CustomerRepository<B: StorageBackend> {
    store: Store<B, Customer>,
    reservations: Store<B, Reservation>,
}

impl<B: StorageBackend> CustomerRepository<B> {
    pub fn new(backend: B) -> Self {
        Self {
            store: Store::new(backend.clone(), CUSTOMERS_FILE),
            reservations: Store::new(backend, RESERVATIONS_FILE),
        }
    }

    pub fn create(&self, id: &str, name: &str, email: &str) -> Result<()> {
        let mut customers = self.store.load()?;
        if customers.contains_key(id) {
            return Err(InnkeepError::duplicate_key("customer", id));
        }

        customers.insert(
            id.to_string(),
            Customer {
                customer_id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
            },
        );
        self.store.save(&customers)
    }

    /// Update selected fields; `None` keeps the current value.
    pub fn modify(&self, id: &str, name: Option<&str>, email: Option<&str>) -> Result<()> {
        let mut customers = self.store.load()?;
        let customer = customers
            .get_mut(id)
            .ok_or_else(|| InnkeepError::not_found("customer", id))?;

        if let Some(name) = name {
            customer.name = name.to_string();
        }
        if let Some(email) = email {
            customer.email = email.to_string();
        }
        self.store.save(&customers)
    }

    /// Remove a customer. Refused while any reservation still points at them.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut customers = self.store.load()?;
        if !customers.contains_key(id) {
            return Err(InnkeepError::not_found("customer", id));
        }

        let reservations = self.reservations.load()?;
        if reservations.values().any(|r| r.customer_id == id) {
            return Err(InnkeepError::referenced("customer", id));
        }

        customers.shift_remove(id);
        self.store.save(&customers)
    }

    /// Full snapshot of the customer store.
    pub fn display(&self) -> Result<IndexMap<String, Customer>> {
        self.store.load()
    }
}
