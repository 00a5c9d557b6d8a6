use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{debt::DebtEntry, income::IncomeEntry, settlement::SettlementRecord};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The ledger aggregate: every debt entry, income entry, and settlement
/// record the user has on file. All mutation goes through the service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub debts: Vec<DebtEntry>,
    #[serde(default)]
    pub incomes: Vec<IncomeEntry>,
    #[serde(default)]
    pub settlements: Vec<SettlementRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            debts: Vec::new(),
            incomes: Vec::new(),
            settlements: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_debt(&mut self, entry: DebtEntry) -> Uuid {
        let id = entry.id;
        self.debts.push(entry);
        self.touch();
        id
    }

    pub fn add_income(&mut self, entry: IncomeEntry) -> Uuid {
        let id = entry.id;
        self.incomes.push(entry);
        self.touch();
        id
    }

    pub fn add_settlement(&mut self, record: SettlementRecord) -> Uuid {
        let id = record.id;
        self.settlements.push(record);
        self.touch();
        id
    }

    pub fn debt(&self, id: Uuid) -> Option<&DebtEntry> {
        self.debts.iter().find(|entry| entry.id == id)
    }

    pub fn debt_mut(&mut self, id: Uuid) -> Option<&mut DebtEntry> {
        self.debts.iter_mut().find(|entry| entry.id == id)
    }

    pub fn income(&self, id: Uuid) -> Option<&IncomeEntry> {
        self.incomes.iter().find(|entry| entry.id == id)
    }

    pub fn income_mut(&mut self, id: Uuid) -> Option<&mut IncomeEntry> {
        self.incomes.iter_mut().find(|entry| entry.id == id)
    }

    pub fn settlements_for_debt(&self, debt_id: Uuid) -> Vec<&SettlementRecord> {
        self.settlements
            .iter()
            .filter(|record| record.debt_id == debt_id)
            .collect()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
