//! Ledger repository: transaction and payment mutations.
//!
//! Every operation is a read-modify-write of one customer document.
//! Validation runs against the loaded copy before anything is written, so
//! a rejected mutation leaves the store untouched.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tranzero_core::customer::Customer;
use tranzero_core::ledger::{
    NewTransaction, Payment, Transaction, TransactionStatus, validate_payment_amount,
    validate_transaction_amounts,
};
use tranzero_shared::types::{CustomerId, PaymentId, RequestContext, TeamId, TransactionId};

use crate::activity::ActivityRecorder;
use crate::store::CustomerStore;

use super::RepositoryError;

/// Input for editing a transaction's descriptive fields and amounts.
///
/// Payments are untouched by an edit; the status is re-derived against the
/// new amounts, so raising the due amount can demote a paid transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTransaction {
    /// New product or service description.
    pub product_name: String,
    /// New receivable amount.
    pub receivable: Decimal,
    /// New payable amount.
    pub payable: Decimal,
}

/// Target status for a bulk update. Only the two endpoints are reachable:
/// `partial` exists solely as a derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkStatus {
    /// Replace payments with a single covering payment.
    Paid,
    /// Clear all payments.
    Unpaid,
}

/// Transaction and payment operations.
#[derive(Clone)]
pub struct LedgerRepository {
    store: Arc<dyn CustomerStore>,
    activity: Arc<dyn ActivityRecorder>,
}

impl LedgerRepository {
    /// Creates a repository over the given store and recorder.
    pub fn new(store: Arc<dyn CustomerStore>, activity: Arc<dyn ActivityRecorder>) -> Self {
        Self { store, activity }
    }

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

    /// Adds a transaction to a customer.
    pub async fn add_transaction(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        customer_id: &CustomerId,
        input: NewTransaction,
    ) -> Result<Transaction, RepositoryError> {
        validate_transaction_amounts(input.receivable, input.payable)?;
        let mut customer = self.load_active(team, customer_id).await?;
        let now = Utc::now();
        let transaction = input.into_transaction(now);
        customer.transactions.push(transaction.clone());
        customer.touch(now);
        self.store.put(team, customer).await?;
        self.activity
            .record(
                team,
                ctx,
                "Added Transaction",
                json!({ "product": transaction.product_name }),
            )
            .await;
        Ok(transaction)
    }

    /// Edits a transaction's description and amounts, keeping its payments.
    pub async fn update_transaction(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        customer_id: &CustomerId,
        transaction_id: &TransactionId,
        input: UpdateTransaction,
    ) -> Result<Transaction, RepositoryError> {
        validate_transaction_amounts(input.receivable, input.payable)?;
        let mut customer = self.load_active(team, customer_id).await?;
        let transaction = customer
            .transaction_mut(transaction_id)
            .ok_or(RepositoryError::TransactionNotFound)?;

        transaction.product_name = input.product_name;
        transaction.receivable = input.receivable;
        transaction.payable = input.payable;
        transaction.refresh_status();
        let updated = transaction.clone();

        customer.touch(Utc::now());
        self.store.put(team, customer).await?;
        self.activity
            .record(
                team,
                ctx,
                "Updated Transaction",
                json!({ "product": updated.product_name }),
            )
            .await;
        Ok(updated)
    }

    /// Deletes a transaction and its payment history.
    pub async fn delete_transaction(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        customer_id: &CustomerId,
        transaction_id: &TransactionId,
    ) -> Result<(), RepositoryError> {
        let mut customer = self.load_active(team, customer_id).await?;
        let before = customer.transactions.len();
        customer.transactions.retain(|t| &t.id != transaction_id);
        if customer.transactions.len() == before {
            return Err(RepositoryError::TransactionNotFound);
        }
        customer.touch(Utc::now());
        self.store.put(team, customer).await?;
        self.activity
            .record(
                team,
                ctx,
                "Deleted Transaction",
                json!({ "transaction_id": transaction_id.as_str() }),
            )
            .await;
        Ok(())
    }

    /// Flips a transaction between paid and unpaid.
    ///
    /// Paid becomes unpaid by clearing payments; anything else becomes paid
    /// via a single covering payment. Status always stays derivable from
    /// payment history.
    pub async fn toggle_transaction_status(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        customer_id: &CustomerId,
        transaction_id: &TransactionId,
    ) -> Result<Transaction, RepositoryError> {
        let mut customer = self.load_active(team, customer_id).await?;
        let now = Utc::now();
        let transaction = customer
            .transaction_mut(transaction_id)
            .ok_or(RepositoryError::TransactionNotFound)?;

        if transaction.status == TransactionStatus::Paid {
            transaction.payments.clear();
        } else {
            transaction.payments = vec![Payment::covering(transaction.total_due(), now)];
        }
        transaction.refresh_status();
        let updated = transaction.clone();

        customer.touch(now);
        self.store.put(team, customer).await?;
        self.activity
            .record(
                team,
                ctx,
                "Toggled Transaction Status",
                json!({ "status": updated.status.to_string() }),
            )
            .await;
        Ok(updated)
    }

    /// Records a partial payment against a transaction.
    pub async fn add_payment(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        customer_id: &CustomerId,
        transaction_id: &TransactionId,
        amount: Decimal,
    ) -> Result<Payment, RepositoryError> {
        let mut customer = self.load_active(team, customer_id).await?;
        let now = Utc::now();
        let transaction = customer
            .transaction_mut(transaction_id)
            .ok_or(RepositoryError::TransactionNotFound)?;

        validate_payment_amount(transaction, amount)?;
        let payment = Payment::new(amount, now);
        transaction.payments.push(payment.clone());
        transaction.refresh_status();

        customer.touch(now);
        self.store.put(team, customer).await?;
        self.activity
            .record(
                team,
                ctx,
                "Added Payment",
                json!({ "amount": amount.to_string() }),
            )
            .await;
        Ok(payment)
    }

    /// Deletes a payment, reversing its effect on status and balance.
    pub async fn delete_payment(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        customer_id: &CustomerId,
        transaction_id: &TransactionId,
        payment_id: &PaymentId,
    ) -> Result<(), RepositoryError> {
        let mut customer = self.load_active(team, customer_id).await?;
        let transaction = customer
            .transaction_mut(transaction_id)
            .ok_or(RepositoryError::TransactionNotFound)?;

        let before = transaction.payments.len();
        transaction.payments.retain(|p| &p.id != payment_id);
        if transaction.payments.len() == before {
            return Err(RepositoryError::PaymentNotFound);
        }
        transaction.refresh_status();

        customer.touch(Utc::now());
        self.store.put(team, customer).await?;
        self.activity
            .record(
                team,
                ctx,
                "Deleted Payment",
                json!({ "payment_id": payment_id.as_str() }),
            )
            .await;
        Ok(())
    }

    /// Marks a batch of transactions paid or unpaid.
    ///
    /// Unknown IDs are skipped silently; the returned count is how many
    /// transactions were actually updated. Idempotent in effect: marking an
    /// already-paid transaction paid leaves it settled.
    pub async fn bulk_update_status(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        customer_id: &CustomerId,
        transaction_ids: &[TransactionId],
        status: BulkStatus,
    ) -> Result<usize, RepositoryError> {
        let mut customer = self.load_active(team, customer_id).await?;
        let now = Utc::now();
        let mut updated = 0;

        for id in transaction_ids {
            let Some(transaction) = customer.transaction_mut(id) else {
                continue;
            };
            match status {
                BulkStatus::Paid => {
                    transaction.payments = vec![Payment::covering(transaction.total_due(), now)];
                }
                BulkStatus::Unpaid => transaction.payments.clear(),
            }
            transaction.refresh_status();
            updated += 1;
        }

        if updated > 0 {
            customer.touch(now);
            self.store.put(team, customer).await?;
            let label = match status {
                BulkStatus::Paid => "paid",
                BulkStatus::Unpaid => "unpaid",
            };
            self.activity
                .record(
                    team,
                    ctx,
                    &format!("Bulk updated {updated} transactions to {label}"),
                    json!({ "count": updated }),
                )
                .await;
        }
        Ok(updated)
    }

    /// Deletes a batch of transactions, skipping unknown IDs.
    pub async fn bulk_delete_transactions(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        customer_id: &CustomerId,
        transaction_ids: &[TransactionId],
    ) -> Result<usize, RepositoryError> {
        let mut customer = self.load_active(team, customer_id).await?;
        let before = customer.transactions.len();
        customer
            .transactions
            .retain(|t| !transaction_ids.contains(&t.id));
        let deleted = before - customer.transactions.len();

        if deleted > 0 {
            customer.touch(Utc::now());
            self.store.put(team, customer).await?;
            self.activity
                .record(
                    team,
                    ctx,
                    &format!("Bulk deleted {deleted} transactions"),
                    json!({ "count": deleted }),
                )
                .await;
        }
        Ok(deleted)
    }
}
