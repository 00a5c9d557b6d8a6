use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// System-wide financial snapshot derived from the ledger at call time.
///
/// Holds no authority of its own; the aggregator recomputes it from entry
/// state on every request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryView {
    pub total_lent: Money,
    pub total_reimbursed: Money,
    pub current_debt: Money,
    pub cash_waiting_allocation: Money,
    pub bills_pending_settlement: Money,
    /// Cash on hand plus money still owed to the user.
    pub total_assets: Money,
    pub health: LedgerHealth,
    pub work_loop: LoopSummary,
    pub personal_loop: LoopSummary,
}

/// Totals restricted to one partition of the ledger: the work reimbursement
/// loop or the personal income/spending loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoopSummary {
    pub total_lent: Money,
    pub total_reimbursed: Money,
    pub current_debt: Money,
    pub cash_waiting_allocation: Money,
    pub bills_pending_settlement: Money,
}

/// Qualitative label over the summary totals.
///
/// Thresholds are exact integer-cent comparisons:
/// - `bills_pending_settlement == 0` -> `Settled`
/// - otherwise `cash_waiting_allocation > 0` -> `ActionNeeded`
/// - otherwise -> `AwaitingIncome`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LedgerHealth {
    Settled,
    ActionNeeded,
    AwaitingIncome,
}

impl LedgerHealth {
    pub fn classify(bills_pending: Money, cash_waiting: Money) -> Self {
        if bills_pending.is_zero() {
            LedgerHealth::Settled
        } else if cash_waiting.is_positive() {
            LedgerHealth::ActionNeeded
        } else {
            LedgerHealth::AwaitingIncome
        }
    }
}

impl fmt::Display for LedgerHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LedgerHealth::Settled => "Settled",
            LedgerHealth::ActionNeeded => "Action Needed",
            LedgerHealth::AwaitingIncome => "Awaiting Income",
        };
        f.write_str(label)
    }
}
