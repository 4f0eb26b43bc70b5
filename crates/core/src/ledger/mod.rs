//! Customer ledger accounting logic.
//!
//! This module implements the core ledger functionality:
//! - Transaction and payment domain types
//! - Status derivation from recorded payments
//! - Running and outstanding balance aggregation
//! - Business rule validation
//! - Error types for ledger operations

pub mod balance;
pub mod error;
pub mod status;
pub mod transaction;
pub mod validation;

#[cfg(test)]
mod status_props;

pub use balance::LedgerTotals;
pub use error::LedgerError;
pub use status::{TransactionStatus, derive_status};
pub use transaction::{NewTransaction, Payment, Transaction};
pub use validation::{validate_payment_amount, validate_transaction_amounts};
