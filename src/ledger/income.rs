use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// A recorded incoming payment available for allocation against debts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: Uuid,
    pub amount: Money,
    pub amount_unused: Money,
    pub month: String,
    pub source: IncomeSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub received_date: DateTime<Utc>,
}

impl IncomeEntry {
    pub fn new(
        amount: Money,
        month: impl Into<String>,
        source: IncomeSource,
        remark: Option<String>,
        received_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            amount_unused: amount,
            month: month.into(),
            source,
            remark,
            received_date,
        }
    }

    /// Whether any balance remains for future settlements.
    pub fn has_available_balance(&self) -> bool {
        self.amount_unused.is_positive()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IncomeSource {
    Salary,
    Reimbursement,
    Other,
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IncomeSource::Salary => "Salary",
            IncomeSource::Reimbursement => "Reimbursement",
            IncomeSource::Other => "Other",
        };
        f.write_str(label)
    }
}
