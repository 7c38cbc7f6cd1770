#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use super::policy::Membership;
use super::{HolderId, OpenCount, SlotError};

/// 保有者 - 資源を予約する主体
///
/// 会員区分は作成後に変更されない。進行中予約数は予約成功時のみ加算、
/// 取引のクローズ時のみ減算される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    pub holder_id: HolderId,
    pub name: String,
    pub membership: Membership,
    pub open_reservations: OpenCount,
}

impl Holder {
    pub fn new(name: impl Into<String>, membership: Membership) -> Self {
        Self {
            holder_id: HolderId::new(),
            name: name.into(),
            membership,
            open_reservations: OpenCount::new(),
        }
    }
}

/// 純粋関数：予約枠を確保する
///
/// 会員区分の上限との照合と加算を一体で行う。
/// 副作用なし。新しいHolderを返す。
pub fn claim_slot(holder: &Holder) -> Result<Holder, SlotError> {
    let claimed = holder
        .open_reservations
        .claim(holder.membership.reservation_limit())?;

    Ok(Holder {
        open_reservations: claimed,
        ..holder.clone()
    })
}

/// 純粋関数：予約枠を解放する
///
/// 0からの解放は台帳不整合であり`SlotError::Underflow`を返す。
/// 副作用なし。新しいHolderを返す。
pub fn release_slot(holder: &Holder) -> Result<Holder, SlotError> {
    let released = holder.open_reservations.release()?;

    Ok(Holder {
        open_reservations: released,
        ..holder.clone()
    })
}
