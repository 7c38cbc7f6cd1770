use serde::{Deserialize, Serialize};

use super::{HolderId, MatchKey, PromoCode, Tick, TransactionId};

/// コマンド：資源を予約する
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveResource {
    pub match_key: MatchKey,
    pub holder_id: HolderId,
    pub requested_at: Tick,
    pub promo_code: Option<PromoCode>,
}

/// コマンド：予約をクローズする
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseReservation {
    pub transaction_id: TransactionId,
    pub closed_at: Tick,
}
