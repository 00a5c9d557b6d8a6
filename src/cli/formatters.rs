use colored::Colorize;

use crate::ledger::{DebtEntry, DebtStatus, IncomeEntry, LedgerHealth, SummaryView};
use crate::money::Money;

pub fn amount(value: Money, currency: &str) -> String {
    format!("{} {}", value, currency)
}

pub fn debt_row(entry: &DebtEntry, currency: &str) -> String {
    let status = match entry.status() {
        DebtStatus::Pending => "Pending".red().to_string(),
        DebtStatus::PartiallySettled => "Partial".yellow().to_string(),
        DebtStatus::Settled => "Settled".green().to_string(),
    };
    format!(
        "{}  {:<20} {:>12} out {:>12} back [{}] {}",
        entry.id,
        entry.title,
        amount(entry.amount_out, currency),
        amount(entry.amount_reimbursed, currency),
        entry.category,
        status
    )
}

pub fn income_row(entry: &IncomeEntry, currency: &str) -> String {
    let remark = entry.remark.as_deref().unwrap_or("-");
    format!(
        "{}  {:<8} {:>12} received {:>12} unused [{}] {}",
        entry.id,
        entry.month,
        amount(entry.amount, currency),
        amount(entry.amount_unused, currency),
        entry.source,
        remark
    )
}

pub fn summary_block(summary: &SummaryView, currency: &str) -> String {
    let health = match summary.health {
        LedgerHealth::Settled => "Settled".green().to_string(),
        LedgerHealth::ActionNeeded => "Action Needed".yellow().to_string(),
        LedgerHealth::AwaitingIncome => "Awaiting Income".red().to_string(),
    };
    let mut out = String::new();
    out.push_str(&format!("Status:              {}\n", health));
    out.push_str(&format!(
        "Total lent:          {}\n",
        amount(summary.total_lent, currency)
    ));
    out.push_str(&format!(
        "Total reimbursed:    {}\n",
        amount(summary.total_reimbursed, currency)
    ));
    out.push_str(&format!(
        "Current debt:        {}\n",
        amount(summary.current_debt, currency)
    ));
    out.push_str(&format!(
        "Cash waiting:        {}\n",
        amount(summary.cash_waiting_allocation, currency)
    ));
    out.push_str(&format!(
        "Bills pending:       {}\n",
        amount(summary.bills_pending_settlement, currency)
    ));
    out.push_str(&format!(
        "Total assets:        {}\n",
        amount(summary.total_assets, currency)
    ));
    out.push_str(&format!(
        "Work loop debt:      {}   cash {}\n",
        amount(summary.work_loop.current_debt, currency),
        amount(summary.work_loop.cash_waiting_allocation, currency)
    ));
    out.push_str(&format!(
        "Personal loop debt:  {}   cash {}",
        amount(summary.personal_loop.current_debt, currency),
        amount(summary.personal_loop.cash_waiting_allocation, currency)
    ));
    out
}
