//! Lifecycle operations for debt and income entries.

use tracing::info;
use uuid::Uuid;

use crate::core::clock::Clock;
use crate::errors::{LedgerError, Result};
use crate::ledger::{DebtCategory, DebtEntry, IncomeEntry, IncomeSource, Ledger};
use crate::money::Money;

/// Optional filter applied when listing debt entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebtFilter {
    /// Only entries with an outstanding balance.
    pub unsettled_only: bool,
}

/// Optional filter applied when listing income entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncomeFilter {
    /// Only entries with unused balance left to allocate.
    pub available_only: bool,
}

/// Provides validated lifecycle mutations for ledger entries.
///
/// Income entries are append-only: they are created here and consumed by
/// [`crate::core::services::SettlementService`], never edited or deleted.
pub struct EntryService;

impl EntryService {
    /// Records a new advance awaiting reimbursement.
    pub fn add_debt(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        title: &str,
        amount_out: Money,
        category: DebtCategory,
    ) -> Result<DebtEntry> {
        Self::validate_title(title)?;
        Self::validate_positive(amount_out)?;
        let entry = DebtEntry::new(title.trim(), amount_out, category, clock.now());
        info!(id = %entry.id, amount = %amount_out, "debt entry created");
        let snapshot = entry.clone();
        ledger.add_debt(entry);
        Ok(snapshot)
    }

    /// Rewrites a debt entry's title, amount, and category.
    ///
    /// The new amount must cover what has already been reimbursed; shrinking
    /// it below `amount_reimbursed` would break the balance invariant.
    pub fn edit_debt(
        ledger: &mut Ledger,
        id: Uuid,
        title: &str,
        amount_out: Money,
        category: DebtCategory,
    ) -> Result<DebtEntry> {
        Self::validate_title(title)?;
        Self::validate_positive(amount_out)?;
        let entry = ledger.debt(id).ok_or(LedgerError::DebtNotFound(id))?;
        if amount_out < entry.amount_reimbursed {
            return Err(LedgerError::Validation(format!(
                "amount {} is below the {} already reimbursed",
                amount_out, entry.amount_reimbursed
            )));
        }
        let entry = ledger.debt_mut(id).ok_or(LedgerError::DebtNotFound(id))?;
        entry.title = title.trim().to_string();
        entry.amount_out = amount_out;
        entry.category = category;
        let snapshot = entry.clone();
        ledger.touch();
        info!(%id, "debt entry updated");
        Ok(snapshot)
    }

    /// Deletes a debt entry that has no settlements applied to it.
    ///
    /// Once any amount has been reimbursed the entry anchors settlement
    /// records; deleting it would orphan that history, so the call is
    /// rejected instead.
    pub fn remove_debt(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        let entry = ledger.debt(id).ok_or(LedgerError::DebtNotFound(id))?;
        if entry.amount_reimbursed.is_positive() || !ledger.settlements_for_debt(id).is_empty() {
            return Err(LedgerError::Conflict(format!(
                "debt entry `{}` has settlements applied and cannot be deleted",
                entry.title
            )));
        }
        ledger.debts.retain(|entry| entry.id != id);
        ledger.touch();
        info!(%id, "debt entry deleted");
        Ok(())
    }

    /// Returns debt entries matching the filter, insertion order preserved.
    pub fn list_debts(ledger: &Ledger, filter: DebtFilter) -> Vec<&DebtEntry> {
        ledger
            .debts
            .iter()
            .filter(|entry| !filter.unsettled_only || !entry.is_settled())
            .collect()
    }

    /// Records a received payment, fully unallocated to begin with.
    pub fn add_income(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        amount: Money,
        month: &str,
        source: IncomeSource,
        remark: Option<String>,
    ) -> Result<IncomeEntry> {
        Self::validate_positive(amount)?;
        if month.trim().is_empty() {
            return Err(LedgerError::Validation("month must not be empty".into()));
        }
        let entry = IncomeEntry::new(amount, month.trim(), source, remark, clock.now());
        info!(id = %entry.id, amount = %amount, "income entry created");
        let snapshot = entry.clone();
        ledger.add_income(entry);
        Ok(snapshot)
    }

    /// Returns income entries matching the filter, insertion order preserved.
    pub fn list_incomes(ledger: &Ledger, filter: IncomeFilter) -> Vec<&IncomeEntry> {
        ledger
            .incomes
            .iter()
            .filter(|entry| !filter.available_only || entry.has_available_balance())
            .collect()
    }

    fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            Err(LedgerError::Validation("title must not be empty".into()))
        } else {
            Ok(())
        }
    }

    fn validate_positive(amount: Money) -> Result<()> {
        if amount.is_positive() {
            Ok(())
        } else {
            Err(LedgerError::Validation(format!(
                "amount must be positive, got {}",
                amount
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::SystemClock;
    use crate::ledger::DebtStatus;

    fn debt(ledger: &mut Ledger, title: &str, units: i64) -> DebtEntry {
        EntryService::add_debt(
            ledger,
            &SystemClock,
            title,
            Money::from_units(units),
            DebtCategory::Work,
        )
        .expect("debt created")
    }

    #[test]
    fn add_debt_initializes_pending_entry() {
        let mut ledger = Ledger::new("Test");
        let entry = debt(&mut ledger, "Taxi", 300);
        assert_eq!(entry.amount_reimbursed, Money::ZERO);
        assert_eq!(entry.status(), DebtStatus::Pending);
        assert!(ledger.debt(entry.id).is_some());
    }

    #[test]
    fn add_debt_rejects_blank_title_and_nonpositive_amount() {
        let mut ledger = Ledger::new("Test");
        let err = EntryService::add_debt(
            &mut ledger,
            &SystemClock,
            "  ",
            Money::from_units(10),
            DebtCategory::Work,
        )
        .expect_err("blank title must fail");
        assert!(matches!(err, LedgerError::Validation(_)));

        let err = EntryService::add_debt(
            &mut ledger,
            &SystemClock,
            "Taxi",
            Money::ZERO,
            DebtCategory::Work,
        )
        .expect_err("zero amount must fail");
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(ledger.debts.is_empty());
    }

    #[test]
    fn edit_rejects_amount_below_reimbursed() {
        let mut ledger = Ledger::new("Test");
        let entry = debt(&mut ledger, "Hotel", 300);
        ledger.debt_mut(entry.id).unwrap().amount_reimbursed = Money::from_units(200);

        let err = EntryService::edit_debt(
            &mut ledger,
            entry.id,
            "Hotel",
            Money::from_units(150),
            DebtCategory::Work,
        )
        .expect_err("shrinking below reimbursed must fail");
        assert!(matches!(err, LedgerError::Validation(_)));
        // Failed edit leaves the entry untouched.
        assert_eq!(
            ledger.debt(entry.id).unwrap().amount_out,
            Money::from_units(300)
        );
    }

    #[test]
    fn edit_overwrites_fields() {
        let mut ledger = Ledger::new("Test");
        let entry = debt(&mut ledger, "Hotel", 300);
        let updated = EntryService::edit_debt(
            &mut ledger,
            entry.id,
            "Hotel + breakfast",
            Money::from_units(350),
            DebtCategory::Personal,
        )
        .expect("edit succeeds");
        assert_eq!(updated.title, "Hotel + breakfast");
        assert_eq!(updated.amount_out, Money::from_units(350));
        assert_eq!(updated.category, DebtCategory::Personal);
    }

    #[test]
    fn remove_rejects_entries_with_settlements() {
        let mut ledger = Ledger::new("Test");
        let entry = debt(&mut ledger, "Taxi", 300);
        ledger.debt_mut(entry.id).unwrap().amount_reimbursed = Money::from_units(100);

        let err = EntryService::remove_debt(&mut ledger, entry.id)
            .expect_err("partially settled entry must not be deletable");
        assert!(matches!(err, LedgerError::Conflict(_)));
        assert!(ledger.debt(entry.id).is_some());
    }

    #[test]
    fn remove_deletes_untouched_entries() {
        let mut ledger = Ledger::new("Test");
        let entry = debt(&mut ledger, "Taxi", 300);
        EntryService::remove_debt(&mut ledger, entry.id).expect("delete succeeds");
        assert!(ledger.debt(entry.id).is_none());

        let err = EntryService::remove_debt(&mut ledger, entry.id)
            .expect_err("second delete must report missing entry");
        assert!(matches!(err, LedgerError::DebtNotFound(_)));
    }

    #[test]
    fn list_debts_honors_unsettled_filter() {
        let mut ledger = Ledger::new("Test");
        let open = debt(&mut ledger, "Open", 100);
        let closed = debt(&mut ledger, "Closed", 50);
        ledger.debt_mut(closed.id).unwrap().amount_reimbursed = Money::from_units(50);

        assert_eq!(EntryService::list_debts(&ledger, DebtFilter::default()).len(), 2);
        let unsettled = EntryService::list_debts(
            &ledger,
            DebtFilter {
                unsettled_only: true,
            },
        );
        assert_eq!(unsettled.len(), 1);
        assert_eq!(unsettled[0].id, open.id);
    }

    #[test]
    fn timestamps_come_from_the_clock() {
        use crate::core::clock::test_support::FixedClock;
        use chrono::{TimeZone, Utc};

        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let clock = FixedClock(instant);
        let mut ledger = Ledger::new("Test");

        let debt = EntryService::add_debt(
            &mut ledger,
            &clock,
            "Taxi",
            Money::from_units(300),
            DebtCategory::Work,
        )
        .unwrap();
        assert_eq!(debt.created_at, instant);

        let income = EntryService::add_income(
            &mut ledger,
            &clock,
            Money::from_units(500),
            "2024-05",
            IncomeSource::Salary,
            None,
        )
        .unwrap();
        assert_eq!(income.received_date, instant);
    }

    #[test]
    fn add_income_requires_month() {
        let mut ledger = Ledger::new("Test");
        let err = EntryService::add_income(
            &mut ledger,
            &SystemClock,
            Money::from_units(500),
            "",
            IncomeSource::Salary,
            None,
        )
        .expect_err("empty month must fail");
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn list_incomes_honors_available_filter() {
        let mut ledger = Ledger::new("Test");
        let salary = EntryService::add_income(
            &mut ledger,
            &SystemClock,
            Money::from_units(500),
            "2024-05",
            IncomeSource::Salary,
            None,
        )
        .unwrap();
        let spent = EntryService::add_income(
            &mut ledger,
            &SystemClock,
            Money::from_units(200),
            "2024-04",
            IncomeSource::Other,
            Some("gift".into()),
        )
        .unwrap();
        ledger.income_mut(spent.id).unwrap().amount_unused = Money::ZERO;

        let available = EntryService::list_incomes(
            &ledger,
            IncomeFilter {
                available_only: true,
            },
        );
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, salary.id);
    }
}
