//! The settlement engine: moves unused income balance onto outstanding debt.

use tracing::info;
use uuid::Uuid;

use crate::core::clock::Clock;
use crate::errors::{LedgerError, Result};
use crate::ledger::{DebtEntry, IncomeEntry, Ledger, SettlementRecord};
use crate::money::Money;

/// Snapshot of both entries after a successful settlement.
#[derive(Debug, Clone)]
pub struct SettlementOutcome {
    pub debt: DebtEntry,
    pub income: IncomeEntry,
    pub record_id: Uuid,
}

/// Applies allocations from income entries to debt entries.
pub struct SettlementService;

impl SettlementService {
    /// Settles `amount` of the debt entry from the income entry's unused
    /// balance.
    ///
    /// Preconditions are checked in a fixed order, each with a distinct
    /// error, and all of them before any mutation. A failed call therefore
    /// leaves the ledger exactly as it was; a successful one applies both
    /// balance updates and appends a [`SettlementRecord`] as one state
    /// transition.
    pub fn settle(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        debt_id: Uuid,
        income_id: Uuid,
        amount: Money,
    ) -> Result<SettlementOutcome> {
        if !amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "settlement amount must be positive, got {}",
                amount
            )));
        }
        let debt = ledger
            .debt(debt_id)
            .ok_or(LedgerError::DebtNotFound(debt_id))?;
        let income = ledger
            .income(income_id)
            .ok_or(LedgerError::IncomeNotFound(income_id))?;
        let outstanding = debt.outstanding();
        if amount > outstanding {
            return Err(LedgerError::Conflict(format!(
                "settlement of {} exceeds outstanding balance {} on `{}`",
                amount, outstanding, debt.title
            )));
        }
        if amount > income.amount_unused {
            return Err(LedgerError::Conflict(format!(
                "settlement of {} exceeds available balance {} on income `{}`",
                amount, income.amount_unused, income.month
            )));
        }

        // Validation is complete; from here both sides update or neither.
        let debt = ledger
            .debt_mut(debt_id)
            .ok_or(LedgerError::DebtNotFound(debt_id))?;
        debt.amount_reimbursed += amount;
        let debt_snapshot = debt.clone();
        let income = ledger
            .income_mut(income_id)
            .ok_or(LedgerError::IncomeNotFound(income_id))?;
        income.amount_unused -= amount;
        let income_snapshot = income.clone();
        let record = SettlementRecord::new(debt_id, income_id, amount, clock.now());
        let record_id = ledger.add_settlement(record);
        info!(
            %debt_id,
            %income_id,
            amount = %amount,
            status = %debt_snapshot.status(),
            "settlement applied"
        );
        Ok(SettlementOutcome {
            debt: debt_snapshot,
            income: income_snapshot,
            record_id,
        })
    }
}
