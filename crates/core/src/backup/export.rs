//! CSV export of customer ledgers.

use chrono::{DateTime, SecondsFormat, Utc};
use csv::{QuoteStyle, WriterBuilder};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::customer::Customer;

use super::CSV_HEADER;

/// Errors raised while serializing a CSV backup.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer failed.
    #[error("CSV serialization failed: {0}")]
    Write(#[from] csv::Error),

    /// Flushing the in-memory buffer failed.
    #[error("CSV flush failed: {0}")]
    Flush(#[from] std::io::Error),

    /// The serialized output is not valid UTF-8.
    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

fn rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn optional_rfc3339(date: Option<DateTime<Utc>>) -> String {
    date.map(rfc3339).unwrap_or_default()
}

fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Serializes customers to the 12-column backup format.
///
/// Every field is quoted. Removed customers are included so a backup is a
/// true snapshot, not a filtered view.
///
/// # Errors
///
/// Returns an error if CSV serialization fails.
pub fn export_customers_csv(customers: &[Customer]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for customer in customers {
        let base = [
            customer.id.as_str().to_string(),
            customer.name.clone(),
            customer.phone_number.clone().unwrap_or_default(),
            rfc3339(customer.date_added),
            rfc3339(customer.last_edited),
            optional_rfc3339(customer.date_removed),
        ];

        if customer.transactions.is_empty() {
            let mut row = base.to_vec();
            row.extend(std::iter::repeat_n(String::new(), 6));
            writer.write_record(&row)?;
            continue;
        }

        for transaction in &customer.transactions {
            let mut row = base.to_vec();
            row.push(transaction.id.as_str().to_string());
            row.push(rfc3339(transaction.date));
            row.push(transaction.product_name.clone());
            row.push(amount(transaction.receivable));
            row.push(amount(transaction.payable));
            row.push(transaction.status.to_string());
            writer.write_record(&row)?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8(bytes)?)
}
