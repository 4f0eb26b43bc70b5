//! Business rule validation for ledger operations.
//!
//! Validation runs before any write is attempted, so a rejected mutation
//! leaves stored state untouched.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::transaction::Transaction;

/// Validates the receivable/payable pair of a new or edited transaction.
///
/// Exactly one side must be positive: a transaction is either a credit or a
/// debit, never both, and a zero-due transaction is rejected outright.
///
/// # Errors
///
/// Returns an error if either amount is negative, both are positive, or
/// both are zero.
pub fn validate_transaction_amounts(
    receivable: Decimal,
    payable: Decimal,
) -> Result<(), LedgerError> {
    if receivable < Decimal::ZERO || payable < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount);
    }
    if receivable > Decimal::ZERO && payable > Decimal::ZERO {
        return Err(LedgerError::BothSidesPositive);
    }
    if receivable == Decimal::ZERO && payable == Decimal::ZERO {
        return Err(LedgerError::ZeroDue);
    }
    Ok(())
}

/// Validates a payment amount against a transaction's remaining balance.
///
/// The status engine never clamps, so over-payment must be rejected here,
/// before the payment is recorded.
///
/// # Errors
///
/// Returns an error if the amount is not positive or exceeds the remaining
/// balance.
pub fn validate_payment_amount(
    transaction: &Transaction,
    amount: Decimal,
) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositivePayment);
    }
    let remaining = transaction.balance();
    if amount > remaining {
        return Err(LedgerError::Overpayment { amount, remaining });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transaction::{NewTransaction, Payment};
    use chrono::Utc;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn transaction(receivable: Decimal) -> Transaction {
        NewTransaction {
            product_name: "Paint".to_string(),
            receivable,
            payable: Decimal::ZERO,
        }
        .into_transaction(Utc::now())
    }

    #[rstest]
    #[case(dec!(100), dec!(0))]
    #[case(dec!(0), dec!(100))]
    #[case(dec!(0.01), dec!(0))]
    fn test_valid_amount_pairs(#[case] receivable: Decimal, #[case] payable: Decimal) {
        assert!(validate_transaction_amounts(receivable, payable).is_ok());
    }

    #[test]
    fn test_negative_amounts_rejected() {
        assert!(matches!(
            validate_transaction_amounts(dec!(-1), dec!(0)),
            Err(LedgerError::NegativeAmount)
        ));
        assert!(matches!(
            validate_transaction_amounts(dec!(0), dec!(-1)),
            Err(LedgerError::NegativeAmount)
        ));
    }

    #[test]
    fn test_both_sides_positive_rejected() {
        assert!(matches!(
            validate_transaction_amounts(dec!(10), dec!(10)),
            Err(LedgerError::BothSidesPositive)
        ));
    }

    #[test]
    fn test_zero_due_rejected() {
        assert!(matches!(
            validate_transaction_amounts(dec!(0), dec!(0)),
            Err(LedgerError::ZeroDue)
        ));
    }

    #[test]
    fn test_payment_must_be_positive() {
        let t = transaction(dec!(100));
        assert!(matches!(
            validate_payment_amount(&t, dec!(0)),
            Err(LedgerError::NonPositivePayment)
        ));
        assert!(matches!(
            validate_payment_amount(&t, dec!(-5)),
            Err(LedgerError::NonPositivePayment)
        ));
    }

    #[test]
    fn test_payment_up_to_remaining_allowed() {
        let mut t = transaction(dec!(100));
        t.payments.push(Payment::new(dec!(40), Utc::now()));
        t.refresh_status();

        assert!(validate_payment_amount(&t, dec!(60)).is_ok());
        assert!(matches!(
            validate_payment_amount(&t, dec!(60.01)),
            Err(LedgerError::Overpayment { .. })
        ));
    }

    #[test]
    fn test_settled_transaction_rejects_any_payment() {
        // After 40 + 60 against 100, one more unit is refused.
        let mut t = transaction(dec!(100));
        t.payments.push(Payment::new(dec!(40), Utc::now()));
        t.payments.push(Payment::new(dec!(60), Utc::now()));
        t.refresh_status();

        assert!(matches!(
            validate_payment_amount(&t, dec!(1)),
            Err(LedgerError::Overpayment { .. })
        ));
    }
}
