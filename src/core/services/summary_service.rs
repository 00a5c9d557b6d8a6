//! Read-side aggregation over the full ledger.

use crate::ledger::{
    DebtCategory, DebtEntry, IncomeEntry, IncomeSource, Ledger, LedgerHealth, LoopSummary,
    SummaryView,
};
use crate::money::Money;

/// Derives the financial summary from current entry state.
///
/// Stateless: every call scans the ledger, so two calls with no intervening
/// mutation produce identical views.
pub struct SummaryService;

impl SummaryService {
    pub fn summarize(ledger: &Ledger) -> SummaryView {
        let all = Self::loop_totals(ledger.debts.iter(), ledger.incomes.iter());
        let work_loop = Self::loop_totals(
            ledger
                .debts
                .iter()
                .filter(|entry| entry.category == DebtCategory::Work),
            ledger
                .incomes
                .iter()
                .filter(|entry| entry.source == IncomeSource::Reimbursement),
        );
        let personal_loop = Self::loop_totals(
            ledger
                .debts
                .iter()
                .filter(|entry| entry.category == DebtCategory::Personal),
            ledger
                .incomes
                .iter()
                .filter(|entry| entry.source != IncomeSource::Reimbursement),
        );

        let health = LedgerHealth::classify(
            all.bills_pending_settlement,
            all.cash_waiting_allocation,
        );
        SummaryView {
            total_lent: all.total_lent,
            total_reimbursed: all.total_reimbursed,
            current_debt: all.current_debt,
            cash_waiting_allocation: all.cash_waiting_allocation,
            bills_pending_settlement: all.bills_pending_settlement,
            total_assets: all.cash_waiting_allocation + all.current_debt,
            health,
            work_loop,
            personal_loop,
        }
    }

    fn loop_totals<'a>(
        debts: impl Iterator<Item = &'a DebtEntry>,
        incomes: impl Iterator<Item = &'a IncomeEntry>,
    ) -> LoopSummary {
        let mut totals = LoopSummary::default();
        for entry in debts {
            totals.total_lent += entry.amount_out;
            totals.total_reimbursed += entry.amount_reimbursed;
            if !entry.is_settled() {
                totals.bills_pending_settlement += entry.outstanding();
            }
        }
        totals.current_debt = totals.total_lent - totals.total_reimbursed;
        totals.cash_waiting_allocation = incomes.map(|entry| entry.amount_unused).sum::<Money>();
        totals
    }
}
