//! Property tests for status derivation and balance behavior.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::status::{TransactionStatus, derive_status};
use super::transaction::{NewTransaction, Payment, Transaction};

/// Strategy for positive due amounts (0.01 ..= 1,000,000.00).
fn due_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for non-negative paid amounts.
fn paid_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=200_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn receivable_transaction(due: Decimal) -> Transaction {
    NewTransaction {
        product_name: "Goods".to_string(),
        receivable: due,
        payable: Decimal::ZERO,
    }
    .into_transaction(Utc::now())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The (due, paid) plane partitions into exactly the three statuses.
    #[test]
    fn prop_status_partition(due in due_strategy(), paid in paid_strategy()) {
        let status = derive_status(due, paid);
        let expected = if paid >= due {
            TransactionStatus::Paid
        } else if paid > Decimal::ZERO {
            TransactionStatus::Partial
        } else {
            TransactionStatus::Unpaid
        };
        prop_assert_eq!(status, expected);
    }

    /// Adding a payment never increases the remaining balance.
    #[test]
    fn prop_adding_payment_never_increases_balance(
        due in due_strategy(),
        amount in (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2)),
    ) {
        let mut t = receivable_transaction(due);
        let before = t.balance();

        t.payments.push(Payment::new(amount, Utc::now()));
        t.refresh_status();

        prop_assert!(t.balance() <= before);
        prop_assert_eq!(t.balance(), before - amount);
    }

    /// Deleting a payment exactly restores the prior balance and status.
    #[test]
    fn prop_add_then_delete_round_trips(
        due in due_strategy(),
        amounts in prop::collection::vec(
            (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2)),
            0..5,
        ),
        extra in (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2)),
    ) {
        let mut t = receivable_transaction(due);
        for amount in amounts {
            t.payments.push(Payment::new(amount, Utc::now()));
        }
        t.refresh_status();

        let status_before = t.status;
        let balance_before = t.balance();

        let payment = Payment::new(extra, Utc::now());
        let id = payment.id.clone();
        t.payments.push(payment);
        t.refresh_status();

        t.payments.retain(|p| p.id != id);
        t.refresh_status();

        prop_assert_eq!(t.status, status_before);
        prop_assert_eq!(t.balance(), balance_before);
    }

    /// Status always matches a fresh derivation after arbitrary payment churn.
    #[test]
    fn prop_status_always_rederivable(
        due in due_strategy(),
        amounts in prop::collection::vec(
            (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2)),
            0..8,
        ),
    ) {
        let mut t = receivable_transaction(due);
        for amount in amounts {
            t.payments.push(Payment::new(amount, Utc::now()));
            t.refresh_status();
            prop_assert_eq!(t.status, derive_status(t.total_due(), t.total_paid()));
        }
        while t.payments.pop().is_some() {
            t.refresh_status();
            prop_assert_eq!(t.status, derive_status(t.total_due(), t.total_paid()));
        }
        prop_assert_eq!(t.status, TransactionStatus::Unpaid);
    }
}
