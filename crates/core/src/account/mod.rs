//! Account status classification from aggregate totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall standing of an account, derived from its net balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    /// Net balance is positive: more is owed to the ledger owner.
    Credit,
    /// Net balance is negative: the ledger owner owes more.
    Debit,
    /// Receivable and payable cancel out exactly.
    Settled,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Credit => "Credit",
            Self::Debit => "Debit",
            Self::Settled => "Settled",
        };
        write!(f, "{label}")
    }
}

/// Result of an account status analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAnalysis {
    /// Receivable minus payable.
    pub net_balance: Decimal,
    /// Classification of the net balance.
    pub account_status: AccountStatus,
}

/// Classifies an account from its total receivable and payable.
#[must_use]
pub fn analyze_account_status(total_receivable: Decimal, total_payable: Decimal) -> AccountAnalysis {
    let net_balance = total_receivable - total_payable;
    let account_status = if net_balance > Decimal::ZERO {
        AccountStatus::Credit
    } else if net_balance < Decimal::ZERO {
        AccountStatus::Debit
    } else {
        AccountStatus::Settled
    };
    AccountAnalysis {
        net_balance,
        account_status,
    }
}
