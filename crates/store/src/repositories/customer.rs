//! Customer repository: CRUD, team summaries, and CSV backup.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tranzero_core::backup::{export_customers_csv, import_customers_csv};
use tranzero_core::customer::Customer;
use tranzero_core::ledger::{LedgerError, LedgerTotals, validate_transaction_amounts};
use tranzero_shared::types::{CustomerId, RequestContext, TeamId};

use crate::activity::ActivityRecorder;
use crate::store::CustomerStore;

use super::RepositoryError;

/// Input for creating a customer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    /// Display name (required, non-empty).
    pub name: String,
    /// Optional contact phone number.
    pub phone_number: Option<String>,
}

/// Input for editing a customer's profile fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomer {
    /// New display name.
    pub name: String,
    /// New phone number, or `None` to clear it.
    pub phone_number: Option<String>,
}

/// Running and outstanding totals for a whole team.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TeamSummary {
    /// Every open transaction's remaining balance, by side.
    pub running: LedgerTotals,
    /// Unpaid transactions at their full due amounts.
    pub outstanding: LedgerTotals,
}

/// Customer-level operations: profile CRUD, listings, and backup.
#[derive(Clone)]
pub struct CustomerRepository {
    store: Arc<dyn CustomerStore>,
    activity: Arc<dyn ActivityRecorder>,
}

impl CustomerRepository {
    /// Creates a repository over the given store and recorder.
    pub fn new(store: Arc<dyn CustomerStore>, activity: Arc<dyn ActivityRecorder>) -> Self {
        Self { store, activity }
    }

    /// Fetches an active customer, or fails with not-found.
    async fn load_active(
        &self,
        team: &TeamId,
        id: &CustomerId,
    ) -> Result<Customer, RepositoryError> {
        match self.store.get(team, id).await? {
            Some(customer) if !customer.is_removed() => Ok(customer),
            _ => Err(RepositoryError::CustomerNotFound),
        }
    }

    /// Creates a new customer.
    pub async fn add(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        input: NewCustomer,
    ) -> Result<Customer, RepositoryError> {
        if input.name.trim().is_empty() {
            return Err(LedgerError::EmptyCustomerName.into());
        }
        let customer = Customer::new(
            CustomerId::new(),
            input.name.trim(),
            input.phone_number,
            Utc::now(),
        );
        self.store.put(team, customer.clone()).await?;
        self.activity
            .record(team, ctx, "Created Customer", json!({ "name": customer.name }))
            .await;
        Ok(customer)
    }

    /// Updates a customer's name and phone number.
    pub async fn update(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        id: &CustomerId,
        input: UpdateCustomer,
    ) -> Result<Customer, RepositoryError> {
        if input.name.trim().is_empty() {
            return Err(LedgerError::EmptyCustomerName.into());
        }
        let mut customer = self.load_active(team, id).await?;
        customer.name = input.name.trim().to_string();
        customer.phone_number = input.phone_number;
        customer.touch(Utc::now());
        self.store.put(team, customer.clone()).await?;
        self.activity
            .record(team, ctx, "Updated Customer", json!({ "name": customer.name }))
            .await;
        Ok(customer)
    }

    /// Soft-deletes a customer: the document stays, listings and totals skip it.
    pub async fn soft_delete(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        id: &CustomerId,
    ) -> Result<(), RepositoryError> {
        let mut customer = self.load_active(team, id).await?;
        let now = Utc::now();
        customer.date_removed = Some(now);
        customer.touch(now);
        let name = customer.name.clone();
        self.store.put(team, customer).await?;
        self.activity
            .record(team, ctx, "Deleted Customer", json!({ "name": name }))
            .await;
        Ok(())
    }

    /// Fetches one active customer.
    pub async fn get(
        &self,
        team: &TeamId,
        id: &CustomerId,
    ) -> Result<Customer, RepositoryError> {
        self.load_active(team, id).await
    }

    /// Lists active customers, most recently edited first.
    pub async fn list(&self, team: &TeamId) -> Result<Vec<Customer>, RepositoryError> {
        let mut customers: Vec<Customer> = self
            .store
            .list(team)
            .await?
            .into_iter()
            .filter(|c| !c.is_removed())
            .collect();
        customers.sort_by(|a, b| b.last_edited.cmp(&a.last_edited));
        Ok(customers)
    }

    /// Computes the team's running and outstanding totals.
    pub async fn summary(&self, team: &TeamId) -> Result<TeamSummary, RepositoryError> {
        let customers = self.store.list(team).await?;
        Ok(TeamSummary {
            running: LedgerTotals::running_for_customers(&customers),
            outstanding: LedgerTotals::outstanding_for_customers(&customers),
        })
    }

    /// Exports every customer, removed ones included, as CSV.
    pub async fn export_csv(&self, team: &TeamId) -> Result<String, RepositoryError> {
        let mut customers = self.store.list(team).await?;
        customers.sort_by(|a, b| b.last_edited.cmp(&a.last_edited));
        Ok(export_customers_csv(&customers)?)
    }

    /// Exports a single active customer's statement as CSV.
    pub async fn export_customer_csv(
        &self,
        team: &TeamId,
        id: &CustomerId,
    ) -> Result<String, RepositoryError> {
        let customer = self.load_active(team, id).await?;
        Ok(export_customers_csv(std::slice::from_ref(&customer))?)
    }

    /// Imports a CSV backup, upserting by customer ID.
    ///
    /// All-or-nothing: any bad row rejects the whole file and nothing is
    /// written. Statuses are re-derived from payment history on the way in.
    pub async fn import_csv(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        data: &str,
    ) -> Result<usize, RepositoryError> {
        let customers = import_customers_csv(data, Utc::now())?;
        for (index, customer) in customers.iter().enumerate() {
            for transaction in &customer.transactions {
                validate_transaction_amounts(transaction.receivable, transaction.payable)
                    .map_err(|e| LedgerError::InvalidImportRecord {
                        index,
                        reason: e.to_string(),
                    })?;
            }
        }
        let count = customers.len();
        self.store.put_many(team, customers).await?;
        self.activity
            .record(
                team,
                ctx,
                &format!("Imported {count} customers"),
                json!({ "count": count }),
            )
            .await;
        Ok(count)
    }
}
