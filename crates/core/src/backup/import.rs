//! CSV import of customer ledgers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use serde::Deserialize;
use tranzero_shared::types::{CustomerId, TransactionId};

use crate::customer::Customer;
use crate::ledger::{Payment, Transaction, TransactionStatus};

use super::error::ImportError;

/// One raw CSV row. Column names match the export header exactly.
#[derive(Debug, Deserialize)]
struct BackupRow {
    #[serde(rename = "CustomerID")]
    customer_id: String,
    #[serde(rename = "CustomerName")]
    customer_name: String,
    #[serde(rename = "PhoneNumber")]
    phone_number: String,
    #[serde(rename = "DateAdded")]
    date_added: String,
    #[serde(rename = "LastEdited")]
    last_edited: String,
    #[serde(rename = "DateRemoved")]
    date_removed: String,
    #[serde(rename = "TransactionID")]
    transaction_id: String,
    #[serde(rename = "TransactionDate")]
    transaction_date: String,
    #[serde(rename = "Product/Service")]
    product_name: String,
    #[serde(rename = "Receivable")]
    receivable: String,
    #[serde(rename = "Payable")]
    payable: String,
    #[serde(rename = "Status")]
    status: String,
}

fn parse_amount(value: &str, line: usize) -> Result<Decimal, ImportError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    trimmed.parse().map_err(|_| ImportError::InvalidAmount {
        line,
        value: value.to_string(),
    })
}

fn parse_date(value: &str, line: usize, now: DateTime<Utc>) -> Result<DateTime<Utc>, ImportError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(now);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| ImportError::InvalidDate {
            line,
            value: value.to_string(),
        })
}

/// Parses a CSV backup back into customers.
///
/// Rows are grouped by `CustomerID` in first-seen order; a row with an empty
/// `TransactionID` contributes only the customer. Parsing is all-or-nothing:
/// the first bad row fails the whole file and nothing is returned.
///
/// Statuses are not trusted as-is. A `paid` row gets a single payment
/// covering its due amount; any other status derives from the (empty)
/// payment list, so a `partial` row comes back as `unpaid`.
///
/// # Errors
///
/// Returns an error for malformed CSV, a missing customer ID or name, an
/// unparseable amount, date, or status, or a file with no data rows.
pub fn import_customers_csv(data: &str, now: DateTime<Utc>) -> Result<Vec<Customer>, ImportError> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut customers: Vec<Customer> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for (idx, result) in reader.deserialize::<BackupRow>().enumerate() {
        // Header is line 1, first data row is line 2.
        let line = idx + 2;
        let row = result?;

        if row.customer_id.is_empty() {
            return Err(ImportError::MissingCustomerId { line });
        }
        if row.customer_name.is_empty() {
            return Err(ImportError::MissingCustomerName { line });
        }

        let slot = match index_by_id.get(&row.customer_id) {
            Some(&i) => i,
            None => {
                let customer = Customer {
                    id: CustomerId::from_string(row.customer_id.clone()),
                    name: row.customer_name.clone(),
                    phone_number: (!row.phone_number.is_empty())
                        .then(|| row.phone_number.clone()),
                    date_added: parse_date(&row.date_added, line, now)?,
                    last_edited: parse_date(&row.last_edited, line, now)?,
                    date_removed: if row.date_removed.is_empty() {
                        None
                    } else {
                        Some(parse_date(&row.date_removed, line, now)?)
                    },
                    transactions: Vec::new(),
                };
                index_by_id.insert(row.customer_id.clone(), customers.len());
                customers.push(customer);
                customers.len() - 1
            }
        };

        if row.transaction_id.is_empty() {
            continue;
        }

        let receivable = parse_amount(&row.receivable, line)?;
        let payable = parse_amount(&row.payable, line)?;
        let date = parse_date(&row.transaction_date, line, now)?;
        let declared: TransactionStatus =
            row.status.parse().map_err(|_| ImportError::InvalidStatus {
                line,
                value: row.status.clone(),
            })?;

        let mut transaction = Transaction {
            id: TransactionId::from_string(row.transaction_id),
            product_name: row.product_name,
            receivable,
            payable,
            date,
            status: TransactionStatus::Unpaid,
            payments: Vec::new(),
        };
        if declared == TransactionStatus::Paid {
            transaction
                .payments
                .push(Payment::covering(transaction.total_due(), date));
        }
        transaction.refresh_status();
        customers[slot].transactions.push(transaction);
    }

    if customers.is_empty() {
        return Err(ImportError::EmptyBatch);
    }
    Ok(customers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::export_customers_csv;
    use crate::ledger::NewTransaction;
    use rust_decimal_macros::dec;

    const HEADER: &str = "CustomerID,CustomerName,PhoneNumber,DateAdded,LastEdited,\
                          DateRemoved,TransactionID,TransactionDate,Product/Service,\
                          Receivable,Payable,Status";

    fn csv(rows: &[&str]) -> String {
        let mut out = HEADER.to_string();
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn test_rows_group_by_customer_in_first_seen_order() {
        let data = csv(&[
            "c1,Ali Traders,,,,,t1,,Bricks,100,0,unpaid",
            "c2,Bilal & Co,,,,,t2,,Sand,0,50,unpaid",
            "c1,Ali Traders,,,,,t3,,Gravel,200,0,unpaid",
        ]);
        let customers = import_customers_csv(&data, Utc::now()).unwrap();

        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].id.as_str(), "c1");
        assert_eq!(customers[0].transactions.len(), 2);
        assert_eq!(customers[1].id.as_str(), "c2");
        assert_eq!(customers[1].transactions.len(), 1);
    }

    #[test]
    fn test_row_without_transaction_id_yields_empty_customer() {
        let data = csv(&["c1,Empty Co,,,,,,,,,,"]);
        let customers = import_customers_csv(&data, Utc::now()).unwrap();
        assert_eq!(customers.len(), 1);
        assert!(customers[0].transactions.is_empty());
    }

    #[test]
    fn test_missing_customer_id_fails_whole_batch() {
        let data = csv(&[
            "c1,Ali Traders,,,,,t1,,Bricks,100,0,unpaid",
            ",Nameless,,,,,t2,,Sand,0,50,unpaid",
        ]);
        let err = import_customers_csv(&data, Utc::now()).unwrap_err();
        assert!(matches!(err, ImportError::MissingCustomerId { line: 3 }));
    }

    #[test]
    fn test_missing_customer_name_fails_whole_batch() {
        let data = csv(&["c1,,,,,,t1,,Bricks,100,0,unpaid"]);
        let err = import_customers_csv(&data, Utc::now()).unwrap_err();
        assert!(matches!(err, ImportError::MissingCustomerName { line: 2 }));
    }

    #[test]
    fn test_invalid_amount_reports_line() {
        let data = csv(&["c1,Ali Traders,,,,,t1,,Bricks,abc,0,unpaid"]);
        let err = import_customers_csv(&data, Utc::now()).unwrap_err();
        assert!(matches!(err, ImportError::InvalidAmount { line: 2, .. }));
    }

    #[test]
    fn test_invalid_status_reports_line() {
        let data = csv(&["c1,Ali Traders,,,,,t1,,Bricks,100,0,overdue"]);
        let err = import_customers_csv(&data, Utc::now()).unwrap_err();
        assert!(matches!(err, ImportError::InvalidStatus { line: 2, .. }));
    }

    #[test]
    fn test_invalid_date_reports_line() {
        let data = csv(&["c1,Ali Traders,,not-a-date,,,t1,,Bricks,100,0,unpaid"]);
        let err = import_customers_csv(&data, Utc::now()).unwrap_err();
        assert!(matches!(err, ImportError::InvalidDate { line: 2, .. }));
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = import_customers_csv(&csv(&[]), Utc::now()).unwrap_err();
        assert!(matches!(err, ImportError::EmptyBatch));
    }

    #[test]
    fn test_empty_amounts_default_to_zero_dates_to_now() {
        let now = Utc::now();
        let data = csv(&["c1,Ali Traders,,,,,t1,,Bricks,100,,unpaid"]);
        let customers = import_customers_csv(&data, now).unwrap();
        let t = &customers[0].transactions[0];
        assert_eq!(t.payable, Decimal::ZERO);
        assert_eq!(t.date, now);
        assert_eq!(customers[0].date_added, now);
    }

    #[test]
    fn test_paid_row_gets_covering_payment() {
        let data = csv(&["c1,Ali Traders,,,,,t1,,Bricks,100,0,paid"]);
        let customers = import_customers_csv(&data, Utc::now()).unwrap();
        let t = &customers[0].transactions[0];
        assert_eq!(t.status, TransactionStatus::Paid);
        assert_eq!(t.payments.len(), 1);
        assert_eq!(t.payments[0].amount, dec!(100));
        assert_eq!(t.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_partial_row_derives_to_unpaid() {
        // Payments are not exported, so a partial row cannot be reconstructed.
        let data = csv(&["c1,Ali Traders,,,,,t1,,Bricks,100,0,partial"]);
        let customers = import_customers_csv(&data, Utc::now()).unwrap();
        assert_eq!(
            customers[0].transactions[0].status,
            TransactionStatus::Unpaid
        );
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let now = Utc::now();
        let mut customer = Customer::new(
            CustomerId::from_string("c1"),
            "Ali Traders",
            Some("0300-1234567".to_string()),
            now,
        );
        customer.transactions.push(
            NewTransaction {
                product_name: "Cement, 50 bags".to_string(),
                receivable: dec!(1500),
                payable: dec!(0),
            }
            .into_transaction(now),
        );

        let exported = export_customers_csv(std::slice::from_ref(&customer)).unwrap();
        let imported = import_customers_csv(&exported, now).unwrap();

        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].id, customer.id);
        assert_eq!(imported[0].name, customer.name);
        assert_eq!(imported[0].phone_number, customer.phone_number);
        let t = &imported[0].transactions[0];
        assert_eq!(t.product_name, "Cement, 50 bags");
        assert_eq!(t.receivable, dec!(1500));
        assert_eq!(t.status, TransactionStatus::Unpaid);
    }
}
