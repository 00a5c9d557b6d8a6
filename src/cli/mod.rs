//! Non-interactive command dispatch for the `reimburse_cli` binary.
//!
//! Thin layer only: argument parsing and rendering live here, all ledger
//! logic stays in the core services.

pub mod formatters;

use std::env;
use std::path::PathBuf;

use uuid::Uuid;

use crate::config::{Config, ConfigManager};
use crate::core::services::{
    DebtFilter, EntryService, IncomeFilter, SettlementService, SummaryService,
};
use crate::core::{LedgerManager, SystemClock};
use crate::errors::{LedgerError, Result};
use crate::ledger::{DebtCategory, IncomeSource};
use crate::money::Money;
use crate::storage::JsonStorage;
use crate::utils::PathResolver;

const ENV_HOME: &str = "REIMBURSE_CORE_HOME";
const DEFAULT_LEDGER: &str = "default";

const USAGE: &str = "usage: reimburse_cli <command>

commands:
  debt add <title> <amount> [work|personal]
  debt edit <id> <title> <amount> [work|personal]
  debt remove <id>
  debt list [--unsettled]
  income add <amount> <month> [salary|reimbursement|other] [remark..]
  income list [--available]
  settle <debt-id> <income-id> <amount>
  summary
  backup [note..]";

pub fn run_cli() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    dispatch(&args)
}

fn dispatch(args: &[&str]) -> Result<()> {
    let Some((command, rest)) = args.split_first() else {
        println!("{USAGE}");
        return Ok(());
    };
    match *command {
        "debt" => cmd_debt(rest),
        "income" => cmd_income(rest),
        "settle" => cmd_settle(rest),
        "summary" => cmd_summary(),
        "backup" => cmd_backup(rest),
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => Err(LedgerError::Validation(format!(
            "unknown command `{}`; try `help`",
            other
        ))),
    }
}

struct CliContext {
    manager: LedgerManager,
    config: Config,
}

impl CliContext {
    fn open() -> Result<Self> {
        let base = env::var_os(ENV_HOME).map(PathBuf::from);
        let config = ConfigManager::with_base_dir(PathResolver::resolve_base(base.clone()))?.load()?;
        let storage = JsonStorage::new(base, Some(config.backup_retention))?;
        let mut manager = LedgerManager::new(Box::new(storage));
        let name = config.default_ledger.as_deref().unwrap_or(DEFAULT_LEDGER);
        manager.load_last_or_create(name)?;
        Ok(Self { manager, config })
    }

    fn commit(&mut self) -> Result<()> {
        self.manager.save()?;
        Ok(())
    }
}

fn cmd_debt(args: &[&str]) -> Result<()> {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(usage_error("debt <add|edit|remove|list>"));
    };
    match *subcommand {
        "add" => {
            let [title, amount, rest @ ..] = rest else {
                return Err(usage_error("debt add <title> <amount> [work|personal]"));
            };
            let category = parse_category(rest.first().copied())?;
            let mut context = CliContext::open()?;
            let entry = EntryService::add_debt(
                context.manager.current_mut()?,
                &SystemClock,
                title,
                Money::parse(amount)?,
                category,
            )?;
            context.commit()?;
            println!("created debt entry {}", entry.id);
            Ok(())
        }
        "edit" => {
            let [id, title, amount, rest @ ..] = rest else {
                return Err(usage_error(
                    "debt edit <id> <title> <amount> [work|personal]",
                ));
            };
            let category = parse_category(rest.first().copied())?;
            let mut context = CliContext::open()?;
            let entry = EntryService::edit_debt(
                context.manager.current_mut()?,
                parse_id(id)?,
                title,
                Money::parse(amount)?,
                category,
            )?;
            context.commit()?;
            println!("updated debt entry {}", entry.id);
            Ok(())
        }
        "remove" => {
            let [id] = rest else {
                return Err(usage_error("debt remove <id>"));
            };
            let mut context = CliContext::open()?;
            EntryService::remove_debt(context.manager.current_mut()?, parse_id(id)?)?;
            context.commit()?;
            println!("removed debt entry {id}");
            Ok(())
        }
        "list" => {
            let filter = DebtFilter {
                unsettled_only: rest.contains(&"--unsettled"),
            };
            let context = CliContext::open()?;
            let ledger = context.manager.current_ref()?;
            for entry in EntryService::list_debts(ledger, filter) {
                println!("{}", formatters::debt_row(entry, &context.config.currency));
            }
            Ok(())
        }
        other => Err(usage_error(&format!("unknown debt subcommand `{other}`"))),
    }
}

fn cmd_income(args: &[&str]) -> Result<()> {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(usage_error("income <add|list>"));
    };
    match *subcommand {
        "add" => {
            let [amount, month, rest @ ..] = rest else {
                return Err(usage_error(
                    "income add <amount> <month> [salary|reimbursement|other] [remark..]",
                ));
            };
            let (source, remark_parts) = match rest.split_first() {
                Some((word, tail)) => match parse_source(word) {
                    Some(source) => (source, tail),
                    None => (IncomeSource::Other, rest),
                },
                None => (IncomeSource::Other, rest),
            };
            let remark = if remark_parts.is_empty() {
                None
            } else {
                Some(remark_parts.join(" "))
            };
            let mut context = CliContext::open()?;
            let entry = EntryService::add_income(
                context.manager.current_mut()?,
                &SystemClock,
                Money::parse(amount)?,
                month,
                source,
                remark,
            )?;
            context.commit()?;
            println!("created income entry {}", entry.id);
            Ok(())
        }
        "list" => {
            let filter = IncomeFilter {
                available_only: rest.contains(&"--available"),
            };
            let context = CliContext::open()?;
            let ledger = context.manager.current_ref()?;
            for entry in EntryService::list_incomes(ledger, filter) {
                println!(
                    "{}",
                    formatters::income_row(entry, &context.config.currency)
                );
            }
            Ok(())
        }
        other => Err(usage_error(&format!("unknown income subcommand `{other}`"))),
    }
}

fn cmd_settle(args: &[&str]) -> Result<()> {
    let [debt_id, income_id, amount] = args else {
        return Err(usage_error("settle <debt-id> <income-id> <amount>"));
    };
    let mut context = CliContext::open()?;
    let outcome = SettlementService::settle(
        context.manager.current_mut()?,
        &SystemClock,
        parse_id(debt_id)?,
        parse_id(income_id)?,
        Money::parse(amount)?,
    )?;
    context.commit()?;
    println!(
        "settled {} against `{}`; debt now {}, income unused {}",
        outcome.record_id,
        outcome.debt.title,
        outcome.debt.status(),
        outcome.income.amount_unused
    );
    Ok(())
}

fn cmd_summary() -> Result<()> {
    let context = CliContext::open()?;
    let summary = SummaryService::summarize(context.manager.current_ref()?);
    println!(
        "{}",
        formatters::summary_block(&summary, &context.config.currency)
    );
    Ok(())
}

fn cmd_backup(args: &[&str]) -> Result<()> {
    let note = if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    };
    let context = CliContext::open()?;
    let path = context.manager.backup(note.as_deref())?;
    println!("backup written to {}", path.display());
    Ok(())
}

fn parse_id(input: &str) -> Result<Uuid> {
    Uuid::parse_str(input)
        .map_err(|_| LedgerError::Validation(format!("invalid id `{}`", input)))
}

fn parse_category(input: Option<&str>) -> Result<DebtCategory> {
    match input {
        None => Ok(DebtCategory::Work),
        Some("work") => Ok(DebtCategory::Work),
        Some("personal") => Ok(DebtCategory::Personal),
        Some(other) => Err(LedgerError::Validation(format!(
            "unknown category `{}`; expected work or personal",
            other
        ))),
    }
}

fn parse_source(input: &str) -> Option<IncomeSource> {
    match input {
        "salary" => Some(IncomeSource::Salary),
        "reimbursement" => Some(IncomeSource::Reimbursement),
        "other" => Some(IncomeSource::Other),
        _ => None,
    }
}

fn usage_error(usage: &str) -> LedgerError {
    LedgerError::Validation(format!("usage: reimburse_cli {usage}"))
}
