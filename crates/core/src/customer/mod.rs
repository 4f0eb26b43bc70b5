//! Customer domain type: the aggregate root for transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tranzero_shared::types::{CustomerId, TransactionId};

use crate::ledger::Transaction;

/// A customer and their complete transaction history.
///
/// Customers are the unit of storage: every ledger mutation is a
/// read-modify-write of one customer document. Removal is soft: a removed
/// customer keeps its history but is excluded from listings and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier within the team.
    pub id: CustomerId,
    /// Display name (never empty).
    pub name: String,
    /// Optional contact phone number.
    pub phone_number: Option<String>,
    /// When the customer was created.
    pub date_added: DateTime<Utc>,
    /// Bumped on every mutation to this customer or their transactions.
    pub last_edited: DateTime<Utc>,
    /// Set when the customer is soft-deleted.
    #[serde(default)]
    pub date_removed: Option<DateTime<Utc>>,
    /// All transactions, including settled ones.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Customer {
    /// Creates a new customer with no transactions.
    #[must_use]
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        phone_number: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            phone_number,
            date_added: now,
            last_edited: now,
            date_removed: None,
            transactions: Vec::new(),
        }
    }

    /// Returns true if the customer has been soft-deleted.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.date_removed.is_some()
    }

    /// Bumps the last-edited timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_edited = now;
    }

    /// Looks up a transaction by ID.
    #[must_use]
    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    /// Looks up a transaction by ID, mutably.
    pub fn transaction_mut(&mut self, id: &TransactionId) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|t| &t.id == id)
    }
}
