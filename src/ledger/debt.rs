use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// A recorded advance payment awaiting reimbursement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtEntry {
    pub id: Uuid,
    pub title: String,
    pub amount_out: Money,
    pub amount_reimbursed: Money,
    pub category: DebtCategory,
    pub created_at: DateTime<Utc>,
}

impl DebtEntry {
    pub fn new(
        title: impl Into<String>,
        amount_out: Money,
        category: DebtCategory,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount_out,
            amount_reimbursed: Money::ZERO,
            category,
            created_at,
        }
    }

    /// Remaining amount still owed to the user for this entry.
    pub fn outstanding(&self) -> Money {
        self.amount_out - self.amount_reimbursed
    }

    /// Settlement state, always recomputed from the two amounts.
    ///
    /// Never stored alongside them; a stored copy could drift from the
    /// balances it is supposed to summarize.
    pub fn status(&self) -> DebtStatus {
        if self.amount_reimbursed.is_zero() {
            DebtStatus::Pending
        } else if self.amount_reimbursed == self.amount_out {
            DebtStatus::Settled
        } else {
            DebtStatus::PartiallySettled
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status() == DebtStatus::Settled
    }
}

/// Classification of a debt entry. Informational only; no behavioral effect
/// beyond summary partitioning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DebtCategory {
    Work,
    Personal,
}

impl fmt::Display for DebtCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DebtCategory::Work => "Work",
            DebtCategory::Personal => "Personal",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DebtStatus {
    Pending,
    PartiallySettled,
    Settled,
}

impl fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DebtStatus::Pending => "Pending",
            DebtStatus::PartiallySettled => "Partially Settled",
            DebtStatus::Settled => "Settled",
        };
        f.write_str(label)
    }
}
