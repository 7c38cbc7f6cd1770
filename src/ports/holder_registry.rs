use crate::domain::holder::Holder;
use crate::domain::HolderId;
use async_trait::async_trait;
use thiserror::Error;

/// 保有者レジストリのエラー
#[derive(Debug, Error)]
pub enum RegistryError {
    /// 未登録の保有者
    #[error("unknown holder: {0:?}")]
    UnknownHolder(HolderId),

    /// 進行中予約数が0の保有者に対する解放。台帳不整合を示す
    #[error("open-reservation count underflow for holder {0:?}")]
    CountUnderflow(HolderId),
}

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, RegistryError>;

/// 予約枠確保の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotClaim {
    /// 枠を確保し、進行中予約数を加算した
    Granted,
    /// 会員区分の上限に達している。状態は変更されない
    AtLimit,
}

/// 保有者レジストリポート
///
/// 進行中予約数の管理を抽象化する。上限との照合と加算は
/// 呼び出し側から見て単一の不可分な操作として振る舞う。
#[allow(dead_code)]
#[async_trait]
pub trait HolderRegistry: Send + Sync {
    /// 保有者をIDで取得する
    async fn get(&self, holder_id: HolderId) -> Result<Option<Holder>>;

    /// 予約枠を1件確保する（照合と加算を一体で行う）
    async fn reserve_slot(&self, holder_id: HolderId) -> Result<SlotClaim>;

    /// 予約枠を1件解放する
    ///
    /// 進行中予約数が既に0の場合は`CountUnderflow`で失敗する。
    /// これは回復可能な条件ではなく、コアの不変条件違反を示す。
    async fn release_slot(&self, holder_id: HolderId) -> Result<()>;
}
