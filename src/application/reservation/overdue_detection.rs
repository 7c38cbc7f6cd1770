use futures::StreamExt;

use crate::domain::reservation::{self, OpenReservation, Reservation};
use crate::domain::Tick;

use super::errors::{ReservationError, Result};
use super::reservation_service::ServiceDependencies;

/// 進行中の取引一覧
///
/// 台帳を挿入順に走査し、クローズされていないエントリを返す。
/// 台帳状態の純粋な関数であり、副作用なしに何度でも実行できる。
#[allow(dead_code)]
pub async fn list_open(deps: &ServiceDependencies) -> Result<Vec<OpenReservation>> {
    scan_ledger(deps, None).await
}

/// 延滞中の取引一覧
///
/// ビジネスルール：
/// - 終了時刻がなく、かつ現在時刻が期限を過ぎているエントリのみ
/// - 延滞は状態ではなく述語。台帳には何も書き戻さない
/// - 結果は常に進行中一覧の部分集合であり、時刻に対して単調に増える
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `at` - 呼び出し側が供給する現在時刻
#[allow(dead_code)]
pub async fn list_overdue(deps: &ServiceDependencies, at: Tick) -> Result<Vec<OpenReservation>> {
    scan_ledger(deps, Some(at)).await
}

/// 台帳の遅延走査（挿入順）
async fn scan_ledger(
    deps: &ServiceDependencies,
    overdue_at: Option<Tick>,
) -> Result<Vec<OpenReservation>> {
    let mut stream = deps.ledger.stream();
    let mut entries = Vec::new();

    while let Some(entry) = stream.next().await {
        let entry = entry.map_err(ReservationError::LedgerError)?;

        let keep = match overdue_at {
            Some(at) => reservation::is_overdue(&entry, at),
            None => true,
        };

        if let Reservation::Open(open) = entry {
            if keep {
                entries.push(open);
            }
        }
    }

    Ok(entries)
}
