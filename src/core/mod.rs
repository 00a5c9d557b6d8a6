//! Business logic: clocks, services, and the persistence-facing manager.

pub mod clock;
pub mod ledger_manager;
pub mod services;

pub use clock::{Clock, SystemClock};
pub use ledger_manager::{LedgerManager, StorageBackend};
