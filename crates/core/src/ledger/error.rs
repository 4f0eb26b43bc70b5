//! Ledger error types for validation failures.
//!
//! These are the fail-closed errors raised before any write is attempted.
//! Not-found and store errors live with the mutation repositories.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger validation.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transaction amounts cannot be negative.
    #[error("Transaction amounts cannot be negative")]
    NegativeAmount,

    /// A transaction is either a credit or a debit, never both.
    #[error("Transaction cannot have both receivable and payable amounts")]
    BothSidesPositive,

    /// Transaction must be due something.
    #[error("Transaction amount must be positive")]
    ZeroDue,

    /// Payment amount must be positive.
    #[error("Payment amount must be positive")]
    NonPositivePayment,

    /// Payment would exceed the remaining balance.
    #[error("Payment of {amount} exceeds remaining balance of {remaining}")]
    Overpayment {
        /// The attempted payment amount.
        amount: Decimal,
        /// The remaining balance on the transaction.
        remaining: Decimal,
    },

    /// Customer name is required.
    #[error("Customer name cannot be empty")]
    EmptyCustomerName,

    /// Import batch contained a structurally invalid record.
    #[error("Import record {index} is invalid: {reason}")]
    InvalidImportRecord {
        /// Zero-based index of the offending record.
        index: usize,
        /// Why the record was rejected.
        reason: String,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::BothSidesPositive => "BOTH_SIDES_POSITIVE",
            Self::ZeroDue => "ZERO_DUE",
            Self::NonPositivePayment => "NON_POSITIVE_PAYMENT",
            Self::Overpayment { .. } => "OVERPAYMENT",
            Self::EmptyCustomerName => "EMPTY_CUSTOMER_NAME",
            Self::InvalidImportRecord { .. } => "INVALID_IMPORT_RECORD",
        }
    }
}
