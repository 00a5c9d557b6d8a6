use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// One allocation event: `amount` moved from an income entry's unused
/// balance onto a debt entry's reimbursed balance.
///
/// Records are immutable once appended. They exist alongside the rolled-up
/// counters so referential integrity between a debt entry and its
/// settlements can be checked during lifecycle operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub id: Uuid,
    pub debt_id: Uuid,
    pub income_id: Uuid,
    pub amount: Money,
    pub settled_at: DateTime<Utc>,
}

impl SettlementRecord {
    pub fn new(debt_id: Uuid, income_id: Uuid, amount: Money, settled_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            debt_id,
            income_id,
            amount,
            settled_at,
        }
    }
}
