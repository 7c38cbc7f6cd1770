use thiserror::Error;

use crate::domain::ResourceId;
use crate::ports::holder_registry::RegistryError;
use crate::ports::ledger::LedgerError;
use crate::ports::resource_catalog::CatalogError;

/// 予約管理アプリケーション層のエラー
///
/// すべて明示的な戻り値として呼び出し側へ返す。コア内部でログに
/// 吸い込んだり握りつぶしたりはしない。再試行もしない。
#[derive(Debug, Error)]
pub enum ReservationError {
    /// 保有者が存在しない
    #[error("Holder not found")]
    HolderNotFound,

    /// 保有者が会員区分の上限に達している。状態は変更されていない
    #[error("Holder is at its reservation limit")]
    LimitExceeded,

    /// 一致する空き資源がない。投機的に確保した予約枠は
    /// このエラーを返す前に解放済み。代替資源があればヒントとして含む
    #[error("No matching resource is available")]
    ResourceUnavailable { alternate: Option<ResourceId> },

    /// 取引が見つからない
    #[error("Transaction not found")]
    TransactionNotFound,

    /// 既にクローズ済み。記録済みの最終費用は変更されていない
    #[error("Transaction is already closed")]
    AlreadyClosed,

    /// コアの不変条件違反（予約数のアンダーフローなど）。回復不能
    #[error("Ledger inconsistency: {0}")]
    LedgerInconsistency(String),

    /// カタログのエラー
    #[error("Resource catalog error")]
    CatalogError(#[source] CatalogError),

    /// レジストリのエラー
    #[error("Holder registry error")]
    RegistryError(#[source] RegistryError),

    /// 台帳のエラー
    #[error("Ledger error")]
    LedgerError(#[source] LedgerError),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, ReservationError>;
