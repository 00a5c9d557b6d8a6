pub mod entry_service;
pub mod settlement_service;
pub mod summary_service;

pub use entry_service::{DebtFilter, EntryService, IncomeFilter};
pub use settlement_service::{SettlementOutcome, SettlementService};
pub use summary_service::SummaryService;
