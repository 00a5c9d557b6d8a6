//! Ledger domain models, persistence-friendly types, and helpers.

pub mod debt;
pub mod income;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod settlement;
pub mod summary;

pub use debt::{DebtCategory, DebtEntry, DebtStatus};
pub use income::{IncomeEntry, IncomeSource};
pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION};
pub use settlement::SettlementRecord;
pub use summary::{LedgerHealth, LoopSummary, SummaryView};
