//! In-memory customer store backed by a concurrent map.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use tranzero_core::customer::Customer;
use tranzero_shared::types::{CustomerId, TeamId};

use crate::store::{CustomerStore, StoreError};

/// Thread-safe in-memory store, one document map per team.
///
/// `put_many` holds the team's shard for the whole batch, so an import is
/// atomic with respect to concurrent reads of the same team.
#[derive(Debug, Default)]
pub struct MemoryStore {
    teams: DashMap<TeamId, HashMap<CustomerId, Customer>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn get(&self, team: &TeamId, id: &CustomerId) -> Result<Option<Customer>, StoreError> {
        Ok(self
            .teams
            .get(team)
            .and_then(|customers| customers.get(id).cloned()))
    }

    async fn put(&self, team: &TeamId, customer: Customer) -> Result<(), StoreError> {
        self.teams
            .entry(team.clone())
            .or_default()
            .insert(customer.id.clone(), customer);
        Ok(())
    }

    async fn put_many(&self, team: &TeamId, customers: Vec<Customer>) -> Result<(), StoreError> {
        let mut entry = self.teams.entry(team.clone()).or_default();
        for customer in customers {
            entry.insert(customer.id.clone(), customer);
        }
        Ok(())
    }

    async fn list(&self, team: &TeamId) -> Result<Vec<Customer>, StoreError> {
        Ok(self
            .teams
            .get(team)
            .map(|customers| customers.values().cloned().collect())
            .unwrap_or_default())
    }
}
