//! Balance aggregation across transactions and customers.
//!
//! Two aggregation modes exist and must not be confused:
//!
//! - **Running totals** include every transaction, weighted by its remaining
//!   balance. This is what the customer list and dashboards show.
//! - **Outstanding totals** are the statement/export snapshot: only
//!   transactions whose status is `unpaid`, summed at their full due
//!   amounts. Partially-paid transactions are excluded entirely.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;

use super::status::TransactionStatus;
use super::transaction::Transaction;

/// Receivable/payable totals for a set of transactions.
///
/// Computed identically whether scoped to one customer or a whole team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Total owed TO the ledger owner.
    pub total_receivable: Decimal,
    /// Total owed BY the ledger owner.
    pub total_payable: Decimal,
}

impl LedgerTotals {
    /// Running totals: every transaction's remaining balance, by side.
    ///
    /// Transactions where both sides are zero are skipped.
    #[must_use]
    pub fn running<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut totals = Self::default();
        for t in transactions {
            let balance = t.balance();
            if t.is_receivable() {
                totals.total_receivable += balance;
            } else if t.is_payable() {
                totals.total_payable += balance;
            }
        }
        totals
    }

    /// Outstanding totals: unpaid transactions at their full due amounts.
    ///
    /// This is the statement snapshot. A partially-paid transaction does not
    /// appear here at all; its remainder is only visible in running totals.
    #[must_use]
    pub fn outstanding<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut totals = Self::default();
        for t in transactions {
            if t.status != TransactionStatus::Unpaid {
                continue;
            }
            totals.total_receivable += t.receivable;
            totals.total_payable += t.payable;
        }
        totals
    }

    /// Running totals across a team's customers, skipping removed ones.
    #[must_use]
    pub fn running_for_customers<'a>(customers: impl IntoIterator<Item = &'a Customer>) -> Self {
        customers
            .into_iter()
            .filter(|c| !c.is_removed())
            .fold(Self::default(), |acc, c| acc.merged(Self::running(&c.transactions)))
    }

    /// Outstanding totals across a team's customers, skipping removed ones.
    #[must_use]
    pub fn outstanding_for_customers<'a>(
        customers: impl IntoIterator<Item = &'a Customer>,
    ) -> Self {
        customers
            .into_iter()
            .filter(|c| !c.is_removed())
            .fold(Self::default(), |acc, c| {
                acc.merged(Self::outstanding(&c.transactions))
            })
    }

    /// Net balance: receivable minus payable.
    #[must_use]
    pub fn net_balance(&self) -> Decimal {
        self.total_receivable - self.total_payable
    }

    fn merged(self, other: Self) -> Self {
        Self {
            total_receivable: self.total_receivable + other.total_receivable,
            total_payable: self.total_payable + other.total_payable,
        }
    }
}
