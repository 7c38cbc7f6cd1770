#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 取引ID - 台帳エントリの集約ID
///
/// プロセス生存期間で単調増加する連番。クローズ後も再利用されない。
/// 採番は台帳の書き込みと同じロックの下で行われる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(u64);

impl TransactionId {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// 資源ID - カタログ管理コンテキストの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(Uuid);

impl ResourceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

/// 保有者ID - 保有者管理コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolderId(Uuid);

impl HolderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for HolderId {
    fn default() -> Self {
        Self::new()
    }
}

/// 時刻（ティック）
///
/// 呼び出し側が供給する日／時間単位の整数時刻。
/// コアは壁時計を持たず、すべての操作で現在時刻を引数として受け取る。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tick(i64);

impl Tick {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// 指定ユニット後の時刻
    pub fn advanced_by(&self, units: i64) -> Self {
        Self(self.0 + units)
    }

    /// `other`からの経過ユニット（負になり得る）
    pub fn units_since(&self, other: Tick) -> i64 {
        self.0 - other.0
    }
}

/// 金額
///
/// 不変条件：負にならない。料金も割引も個別には非負で、
/// 最終費用のクランプ（0未満にしない）は精算側で行う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn plus(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }

    /// 百分率を適用した金額（整数演算、切り捨て）
    pub fn percentage(self, percent: u32) -> Amount {
        Amount(self.0 * u64::from(percent) / 100)
    }
}

/// 同時予約数の上限
///
/// 無制限の会員区分は巨大な整数の番兵ではなく`Unlimited`で表現し、
/// 比較時の暗黙のオーバーフローを避ける。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationLimit {
    Capped(u32),
    Unlimited,
}

impl ReservationLimit {
    /// 現在の進行中予約数でもう1件予約できるか
    pub fn allows(&self, open_count: u32) -> bool {
        match self {
            ReservationLimit::Capped(max) => open_count < *max,
            ReservationLimit::Unlimited => true,
        }
    }
}

/// 予約枠エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// 上限に達している
    LimitReached,
    /// 0からの解放。台帳不整合を示す
    Underflow,
}

/// 進行中予約数
///
/// 不変条件：常に会員区分の上限以下。予約成功時のみ加算され、
/// 取引のクローズ時のみ減算される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenCount(u32);

impl OpenCount {
    /// 新規作成（0件）
    pub fn new() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// 予約枠を1件確保する
    ///
    /// # エラー
    /// 上限に達している場合は`SlotError::LimitReached`を返す
    pub fn claim(self, limit: ReservationLimit) -> Result<Self, SlotError> {
        if !limit.allows(self.0) {
            return Err(SlotError::LimitReached);
        }
        Ok(Self(self.0 + 1))
    }

    /// 予約枠を1件解放する
    ///
    /// # エラー
    /// 既に0の場合は`SlotError::Underflow`を返す。
    /// これは回復可能な状態ではなく、台帳との不整合を意味する。
    pub fn release(self) -> Result<Self, SlotError> {
        if self.0 == 0 {
            return Err(SlotError::Underflow);
        }
        Ok(Self(self.0 - 1))
    }
}

impl Default for OpenCount {
    fn default() -> Self {
        Self::new()
    }
}

/// 資源の照合キー
///
/// カタログは名称の完全一致・カテゴリ・副タグの順ではなく、
/// 登録順に走査して最初に一致した空き資源を返す。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchKey(String);

impl MatchKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// プロモーションコード
///
/// 予約時に提示され、取引に記録される。精算時に割引ポリシーが照合する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromoCode(String);

impl PromoCode {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
