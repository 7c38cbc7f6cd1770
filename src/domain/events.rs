use serde::{Deserialize, Serialize};

use super::{Amount, HolderId, ResourceId, Tick, TransactionId};

/// イベント：予約が開始された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationOpened {
    pub transaction_id: TransactionId,
    pub resource_id: ResourceId,
    pub holder_id: HolderId,
    pub started_at: Tick,
    pub due_at: Tick,
    pub base_cost: Amount,
}

/// イベント：予約がクローズされた
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationClosed {
    pub transaction_id: TransactionId,
    pub resource_id: ResourceId,
    pub holder_id: HolderId,
    pub closed_at: Tick,
    pub late_units: i64,
    pub final_cost: Amount,
    pub was_overdue: bool,
}
