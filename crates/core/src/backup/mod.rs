//! CSV backup: full export and re-import of customer ledgers.
//!
//! The format is one row per transaction, with customer fields repeated on
//! each row. A customer with no transactions still gets one row with the
//! transaction columns empty, so the export loses nothing. Payments are not
//! exported; on import, a `paid` row gets a single covering payment so its
//! status stays derivable from payment history.

mod error;
mod export;
mod import;

pub use error::ImportError;
pub use export::{ExportError, export_customers_csv};
pub use import::import_customers_csv;

/// The exact column header every export starts with and every import expects.
pub const CSV_HEADER: [&str; 12] = [
    "CustomerID",
    "CustomerName",
    "PhoneNumber",
    "DateAdded",
    "LastEdited",
    "DateRemoved",
    "TransactionID",
    "TransactionDate",
    "Product/Service",
    "Receivable",
    "Payable",
    "Status",
];
