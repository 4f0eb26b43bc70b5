//! The customer store trait: the only persistence surface.

use async_trait::async_trait;
use thiserror::Error;
use tranzero_core::customer::Customer;
use tranzero_shared::types::{CustomerId, TeamId};

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed in a backend-specific way.
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Keyed storage of whole customer documents, scoped by team.
///
/// Implementations persist customers as opaque documents; all ledger
/// interpretation happens in the repositories. Ordering of `list` results
/// is unspecified; callers sort.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Fetches one customer, or `None` if absent.
    async fn get(&self, team: &TeamId, id: &CustomerId) -> Result<Option<Customer>, StoreError>;

    /// Inserts or replaces one customer.
    async fn put(&self, team: &TeamId, customer: Customer) -> Result<(), StoreError>;

    /// Inserts or replaces a batch of customers as one operation.
    async fn put_many(&self, team: &TeamId, customers: Vec<Customer>) -> Result<(), StoreError>;

    /// Returns every customer in the team, removed ones included.
    async fn list(&self, team: &TeamId) -> Result<Vec<Customer>, StoreError>;
}
