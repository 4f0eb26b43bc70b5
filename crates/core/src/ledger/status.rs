//! Transaction status derivation.
//!
//! Status is never stored truth: it is always recomputed from the recorded
//! payments. `derive_status` is the single source of truth, invoked after
//! every payment change, bulk status change, and amount edit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment lifecycle status of a transaction.
///
/// Driven only by the payment sum relative to the total due:
/// `unpaid <-> partial <-> paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// No payments recorded.
    Unpaid,
    /// Some payments recorded, but less than the total due.
    Partial,
    /// Payments cover the total due.
    Paid,
}

impl TransactionStatus {
    /// Returns true if the transaction still has an outstanding remainder.
    #[must_use]
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Paid)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unpaid => write!(f, "unpaid"),
            Self::Partial => write!(f, "partial"),
            Self::Paid => write!(f, "paid"),
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unpaid" => Ok(Self::Unpaid),
            "partial" => Ok(Self::Partial),
            "paid" => Ok(Self::Paid),
            _ => Err(format!("Unknown transaction status: {s}")),
        }
    }
}

/// Derives the status of a transaction from its total due and total paid.
///
/// Callers are responsible for rejecting over-payment before recording it;
/// this function never clamps, it only classifies.
#[must_use]
pub fn derive_status(total_due: Decimal, total_paid: Decimal) -> TransactionStatus {
    if total_paid >= total_due {
        return TransactionStatus::Paid;
    }
    if total_paid > Decimal::ZERO {
        return TransactionStatus::Partial;
    }
    TransactionStatus::Unpaid
}
