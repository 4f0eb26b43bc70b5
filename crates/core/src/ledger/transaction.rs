//! Transaction and payment domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tranzero_shared::types::{PaymentId, TransactionId};

use super::status::{TransactionStatus, derive_status};

/// A partial payment recorded against a transaction.
///
/// Immutable once created, except for deletion. Owned exclusively by its
/// parent transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier within the parent transaction.
    pub id: PaymentId,
    /// Payment amount (always positive).
    pub amount: Decimal,
    /// When the payment was recorded.
    pub date: DateTime<Utc>,
}

impl Payment {
    /// Creates a new payment with a fresh ID.
    #[must_use]
    pub fn new(amount: Decimal, date: DateTime<Utc>) -> Self {
        Self {
            id: PaymentId::new(),
            amount,
            date,
        }
    }

    /// Creates the synthetic payment used by "mark as paid" shortcuts.
    ///
    /// Bulk status changes never set the status flag directly: marking a
    /// transaction paid records a single payment covering the full due
    /// amount, so status stays reconstructible from payment history alone.
    #[must_use]
    pub fn covering(total_due: Decimal, date: DateTime<Utc>) -> Self {
        Self::new(total_due, date)
    }
}

/// A single credit or debit owed between the ledger owner and a customer.
///
/// Invariant: exactly one of `receivable` / `payable` is positive; the other
/// is zero. `status` is a pure function of `(total_due, payments)` and must
/// be refreshed via [`Transaction::refresh_status`] whenever payments or
/// amounts change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier within the customer.
    pub id: TransactionId,
    /// What the transaction was for.
    pub product_name: String,
    /// Amount owed TO the ledger owner (credit side).
    pub receivable: Decimal,
    /// Amount owed BY the ledger owner (debit side).
    pub payable: Decimal,
    /// When the transaction was created.
    pub date: DateTime<Utc>,
    /// Derived payment status.
    pub status: TransactionStatus,
    /// Recorded payments, in insertion order.
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Transaction {
    /// Returns the total amount due: the positive side of the transaction.
    #[must_use]
    pub fn total_due(&self) -> Decimal {
        if self.receivable > Decimal::ZERO {
            self.receivable
        } else {
            self.payable
        }
    }

    /// Returns the sum of all recorded payments.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Returns the remaining balance: total due minus total paid.
    ///
    /// Never negative in well-formed data (over-payment is rejected before
    /// it is recorded), and deliberately not clamped.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.total_due() - self.total_paid()
    }

    /// Returns true if this is a receivable (credit) transaction.
    #[must_use]
    pub fn is_receivable(&self) -> bool {
        self.receivable > Decimal::ZERO
    }

    /// Returns true if this is a payable (debit) transaction.
    #[must_use]
    pub fn is_payable(&self) -> bool {
        self.payable > Decimal::ZERO
    }

    /// Recomputes `status` from the current payments.
    ///
    /// Must be called after every payment change or amount edit.
    pub fn refresh_status(&mut self) {
        self.status = derive_status(self.total_due(), self.total_paid());
    }

    /// Looks up a payment by ID.
    #[must_use]
    pub fn payment(&self, id: &PaymentId) -> Option<&Payment> {
        self.payments.iter().find(|p| &p.id == id)
    }
}

/// Input for creating a new transaction.
///
/// Status and payments are never caller-supplied: a new transaction starts
/// with no payments and a status derived from them.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    /// What the transaction is for.
    pub product_name: String,
    /// Amount owed TO the ledger owner (credit side).
    pub receivable: Decimal,
    /// Amount owed BY the ledger owner (debit side).
    pub payable: Decimal,
}

impl NewTransaction {
    /// Materializes the transaction with a fresh ID and timestamp.
    #[must_use]
    pub fn into_transaction(self, date: DateTime<Utc>) -> Transaction {
        let mut transaction = Transaction {
            id: TransactionId::new(),
            product_name: self.product_name,
            receivable: self.receivable,
            payable: self.payable,
            date,
            status: TransactionStatus::Unpaid,
            payments: Vec::new(),
        };
        transaction.refresh_status();
        transaction
    }
}
