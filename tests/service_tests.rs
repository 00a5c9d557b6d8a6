use reimburse_core::{
    core::services::{DebtFilter, EntryService, SettlementService, SummaryService},
    core::SystemClock,
    errors::LedgerError,
    ledger::{DebtCategory, DebtStatus, IncomeSource, Ledger, LedgerHealth},
    money::Money,
};

fn outstanding_total(ledger: &Ledger) -> Money {
    ledger.debts.iter().map(|entry| entry.outstanding()).sum()
}

fn unused_total(ledger: &Ledger) -> Money {
    ledger.incomes.iter().map(|entry| entry.amount_unused).sum()
}

fn recorded_total(ledger: &Ledger) -> Money {
    ledger.settlements.iter().map(|record| record.amount).sum()
}

fn reimbursed_total(ledger: &Ledger) -> Money {
    ledger
        .debts
        .iter()
        .map(|entry| entry.amount_reimbursed)
        .sum()
}

#[test]
fn full_settlement_flow() {
    let mut ledger = Ledger::new("Household");
    let debt = EntryService::add_debt(
        &mut ledger,
        &SystemClock,
        "车费",
        Money::from_units(300),
        DebtCategory::Work,
    )
    .expect("debt created");
    let income = EntryService::add_income(
        &mut ledger,
        &SystemClock,
        Money::from_units(500),
        "2024-05",
        IncomeSource::Salary,
        None,
    )
    .expect("income created");

    let outcome = SettlementService::settle(
        &mut ledger,
        &SystemClock,
        debt.id,
        income.id,
        Money::from_units(300),
    )
    .expect("settlement succeeds");

    assert_eq!(outcome.debt.status(), DebtStatus::Settled);
    assert_eq!(outcome.debt.amount_reimbursed, Money::from_units(300));
    assert_eq!(outcome.income.amount_unused, Money::from_units(200));

    let summary = SummaryService::summarize(&ledger);
    assert_eq!(summary.bills_pending_settlement, Money::ZERO);
    assert_eq!(summary.cash_waiting_allocation, Money::from_units(200));
    assert_eq!(summary.health, LedgerHealth::Settled);
}

#[test]
fn partial_settlements_then_conflict() {
    let mut ledger = Ledger::new("Household");
    let debt = EntryService::add_debt(
        &mut ledger,
        &SystemClock,
        "Conference travel",
        Money::from_units(300),
        DebtCategory::Work,
    )
    .unwrap();
    let first = EntryService::add_income(
        &mut ledger,
        &SystemClock,
        Money::from_units(100),
        "2024-05",
        IncomeSource::Reimbursement,
        None,
    )
    .unwrap();
    let second = EntryService::add_income(
        &mut ledger,
        &SystemClock,
        Money::from_units(100),
        "2024-06",
        IncomeSource::Reimbursement,
        None,
    )
    .unwrap();
    let outstanding_before = outstanding_total(&ledger);
    let unused_before = unused_total(&ledger);

    SettlementService::settle(
        &mut ledger,
        &SystemClock,
        debt.id,
        first.id,
        Money::from_units(100),
    )
    .expect("first settlement");
    SettlementService::settle(
        &mut ledger,
        &SystemClock,
        debt.id,
        second.id,
        Money::from_units(100),
    )
    .expect("second settlement");

    let entry = ledger.debt(debt.id).unwrap();
    assert_eq!(entry.amount_reimbursed, Money::from_units(200));
    assert_eq!(entry.status(), DebtStatus::PartiallySettled);
    // Settlement moves exactly what was asked off each side: the two
    // 100-unit allocations drain outstanding debt and unused income by 200
    // apiece, and the settlement records account for every reimbursed cent.
    assert_eq!(
        outstanding_before - outstanding_total(&ledger),
        Money::from_units(200)
    );
    assert_eq!(
        unused_before - unused_total(&ledger),
        Money::from_units(200)
    );
    assert_eq!(recorded_total(&ledger), reimbursed_total(&ledger));

    let err = SettlementService::settle(
        &mut ledger,
        &SystemClock,
        debt.id,
        second.id,
        Money::from_units(150),
    )
    .expect_err("150 exceeds the 100 still outstanding");
    assert!(matches!(err, LedgerError::Conflict(_)));
    // The rejected call mutated nothing on either side.
    assert_eq!(
        outstanding_total(&ledger),
        outstanding_before - Money::from_units(200)
    );
    assert_eq!(unused_total(&ledger), unused_before - Money::from_units(200));
    assert_eq!(recorded_total(&ledger), reimbursed_total(&ledger));
}

#[test]
fn lifecycle_guards_hold_after_settlement() {
    let mut ledger = Ledger::new("Household");
    let debt = EntryService::add_debt(
        &mut ledger,
        &SystemClock,
        "Team dinner",
        Money::from_units(200),
        DebtCategory::Work,
    )
    .unwrap();
    let income = EntryService::add_income(
        &mut ledger,
        &SystemClock,
        Money::from_units(80),
        "2024-07",
        IncomeSource::Reimbursement,
        None,
    )
    .unwrap();
    SettlementService::settle(
        &mut ledger,
        &SystemClock,
        debt.id,
        income.id,
        Money::from_units(80),
    )
    .unwrap();

    // Cannot shrink the advance below what was already reimbursed.
    let err = EntryService::edit_debt(
        &mut ledger,
        debt.id,
        "Team dinner",
        Money::from_units(50),
        DebtCategory::Work,
    )
    .expect_err("edit below reimbursed must fail");
    assert!(matches!(err, LedgerError::Validation(_)));

    // Cannot delete an entry that anchors settlement records.
    let err = EntryService::remove_debt(&mut ledger, debt.id)
        .expect_err("delete after settlement must fail");
    assert!(matches!(err, LedgerError::Conflict(_)));
    assert_eq!(ledger.settlements_for_debt(debt.id).len(), 1);

    // Raising the amount is fine and reopens the remaining balance.
    let updated = EntryService::edit_debt(
        &mut ledger,
        debt.id,
        "Team dinner + drinks",
        Money::from_units(250),
        DebtCategory::Work,
    )
    .expect("raising the amount is allowed");
    assert_eq!(updated.outstanding(), Money::from_units(170));
}

#[test]
fn entry_invariants_hold_throughout_a_mixed_session() {
    let mut ledger = Ledger::new("Household");
    let debt = EntryService::add_debt(
        &mut ledger,
        &SystemClock,
        "Taxi",
        Money::from_units(120),
        DebtCategory::Personal,
    )
    .unwrap();
    let income = EntryService::add_income(
        &mut ledger,
        &SystemClock,
        Money::from_units(90),
        "2024-08",
        IncomeSource::Salary,
        Some("August pay".into()),
    )
    .unwrap();

    for step in [Money::from_units(30), Money::from_units(60)] {
        SettlementService::settle(&mut ledger, &SystemClock, debt.id, income.id, step).unwrap();
        for entry in &ledger.debts {
            assert!(entry.amount_reimbursed >= Money::ZERO);
            assert!(entry.amount_reimbursed <= entry.amount_out);
        }
        for entry in &ledger.incomes {
            assert!(entry.amount_unused >= Money::ZERO);
            assert!(entry.amount_unused <= entry.amount);
        }
    }

    let summary = SummaryService::summarize(&ledger);
    assert_eq!(summary.current_debt, Money::from_units(30));
    assert_eq!(summary.cash_waiting_allocation, Money::ZERO);
    assert_eq!(summary.health, LedgerHealth::AwaitingIncome);

    let unsettled = EntryService::list_debts(
        &ledger,
        DebtFilter {
            unsettled_only: true,
        },
    );
    assert_eq!(unsettled.len(), 1);
}
