use crate::domain::reservation::{ClosedReservation, OpenReservation, Reservation};
use crate::domain::TransactionId;
use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

/// 台帳のエラー
#[derive(Debug, Error)]
pub enum LedgerError {
    /// 未知の取引ID
    #[error("unknown transaction: {0:?}")]
    UnknownTransaction(TransactionId),

    /// 採番済みIDでの二重追記
    #[error("transaction {0:?} is already on the ledger")]
    DuplicateTransaction(TransactionId),

    /// クローズ済みエントリへのクローズ記録
    #[error("transaction {0:?} is already closed")]
    AlreadyClosed(TransactionId),
}

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, LedgerError>;

/// 台帳ポート
///
/// 取引記録の追記専用ログを抽象化する。エントリは削除されず、
/// クローズ済みのエントリも履歴参照のために残り続ける。
/// 取引IDの採番はエントリの書き込みと同じロックの下で行われる。
#[allow(dead_code)]
#[async_trait]
pub trait Ledger: Send + Sync {
    /// 次の取引IDを採番する
    ///
    /// IDは単調増加し、プロセス生存期間で再利用されない。
    async fn next_transaction_id(&self) -> Result<TransactionId>;

    /// 進行中エントリを追記する
    ///
    /// 同じ取引IDの二重追記は`DuplicateTransaction`で失敗する。
    async fn append(&self, entry: OpenReservation) -> Result<()>;

    /// 取引をIDで取得する
    async fn get(&self, transaction_id: TransactionId) -> Result<Option<Reservation>>;

    /// クローズ済みの形でエントリを置き換える
    ///
    /// 記録のみを行い、ルール（クローズは一度だけ）はドメイン層が守る。
    /// それでもクローズ済みエントリに対して呼ばれた場合は
    /// `AlreadyClosed`で失敗し、記録済みの最終費用は変更されない。
    async fn record_close(&self, entry: ClosedReservation) -> Result<()>;

    /// すべてのエントリを挿入順にストリーム配信する
    ///
    /// 延滞一覧などの走査に使用される。スナップショットに対する
    /// 読み取りであり、副作用なしに何度でも再開できる。
    fn stream(&self) -> BoxStream<'static, Result<Reservation>>;
}
