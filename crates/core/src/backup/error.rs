//! Import error types.
//!
//! Import is all-or-nothing: the first bad row fails the whole batch, and
//! every error carries the 1-based line number of the offending row.

use thiserror::Error;

/// Errors raised while parsing a CSV backup.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A row is missing its customer ID.
    #[error("Line {line}: missing CustomerID")]
    MissingCustomerId {
        /// Line number in the CSV file.
        line: usize,
    },

    /// A row is missing its customer name.
    #[error("Line {line}: missing CustomerName")]
    MissingCustomerName {
        /// Line number in the CSV file.
        line: usize,
    },

    /// A receivable or payable column could not be parsed as a number.
    #[error("Line {line}: invalid amount '{value}'")]
    InvalidAmount {
        /// Line number in the CSV file.
        line: usize,
        /// The unparseable value.
        value: String,
    },

    /// The status column is not one of unpaid/partial/paid.
    #[error("Line {line}: invalid status '{value}'")]
    InvalidStatus {
        /// Line number in the CSV file.
        line: usize,
        /// The unparseable value.
        value: String,
    },

    /// A date column could not be parsed as RFC 3339.
    #[error("Line {line}: invalid date '{value}'")]
    InvalidDate {
        /// Line number in the CSV file.
        line: usize,
        /// The unparseable value.
        value: String,
    },

    /// The file is not structurally valid CSV.
    #[error("Malformed CSV: {0}")]
    Malformed(#[from] csv::Error),

    /// The file contained a header but no data rows.
    #[error("Import file contains no records")]
    EmptyBatch,
}

impl ImportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCustomerId { .. } => "MISSING_CUSTOMER_ID",
            Self::MissingCustomerName { .. } => "MISSING_CUSTOMER_NAME",
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::InvalidStatus { .. } => "INVALID_STATUS",
            Self::InvalidDate { .. } => "INVALID_DATE",
            Self::Malformed(_) => "MALFORMED_CSV",
            Self::EmptyBatch => "EMPTY_IMPORT_BATCH",
        }
    }
}
