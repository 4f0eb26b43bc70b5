//! Repositories: validated, activity-recorded mutations over the store.

pub mod customer;
pub mod ledger;

pub use customer::{CustomerRepository, NewCustomer, TeamSummary, UpdateCustomer};
pub use ledger::{BulkStatus, LedgerRepository, UpdateTransaction};

use thiserror::Error;
use tranzero_core::backup::ImportError;
use tranzero_core::ledger::LedgerError;

use crate::store::StoreError;

/// Errors raised by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A business rule rejected the mutation.
    #[error(transparent)]
    Validation(#[from] LedgerError),

    /// A CSV backup could not be parsed.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// The customer does not exist or has been removed.
    #[error("Customer not found")]
    CustomerNotFound,

    /// The transaction does not exist on this customer.
    #[error("Transaction not found")]
    TransactionNotFound,

    /// The payment does not exist on this transaction.
    #[error("Payment not found")]
    PaymentNotFound,

    /// CSV export failed.
    #[error(transparent)]
    Export(#[from] tranzero_core::backup::ExportError),

    /// The store backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RepositoryError {
    /// Returns the HTTP status code for API responses.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Import(_) => 400,
            Self::CustomerNotFound | Self::TransactionNotFound | Self::PaymentNotFound => 404,
            Self::Export(_) | Self::Store(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Import(e) => e.error_code(),
            Self::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            Self::TransactionNotFound => "TRANSACTION_NOT_FOUND",
            Self::PaymentNotFound => "PAYMENT_NOT_FOUND",
            Self::Export(_) => "EXPORT_FAILED",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}
