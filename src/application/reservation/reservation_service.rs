use crate::domain::billing::{self, Settlement};
use crate::domain::commands::*;
use crate::domain::errors::CloseError;
use crate::domain::policy::{BillingFacts, DiscountPolicy};
use crate::domain::reservation::{self, OpenReservation, Reservation};
use crate::domain::value_objects::*;
use crate::ports::holder_registry::{HolderRegistry, RegistryError, SlotClaim};
use crate::ports::ledger::Ledger;
use crate::ports::resource_catalog::{MatchOutcome, ResourceCatalog};
use std::sync::Arc;

use super::errors::{ReservationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
/// 割引ポリシーの集合も構築時に注入され、以後変化しない。
#[derive(Clone)]
#[allow(dead_code)]
pub struct ServiceDependencies {
    pub catalog: Arc<dyn ResourceCatalog>,
    pub registry: Arc<dyn HolderRegistry>,
    pub ledger: Arc<dyn Ledger>,
    pub discount_policies: Vec<Arc<dyn DiscountPolicy>>,
}

/// 確保済みの予約枠を解放するヘルパー関数
///
/// 資源が見つからなかった経路のロールバックで使用される。
/// 確保した直後の枠が解放できないのは不変条件違反であり、
/// 回復可能なエラーとしては扱わない。
async fn rollback_slot(deps: &ServiceDependencies, holder_id: HolderId) -> Result<()> {
    deps.registry
        .release_slot(holder_id)
        .await
        .map_err(|e| match e {
            RegistryError::CountUnderflow(_) => {
                ReservationError::LedgerInconsistency(e.to_string())
            }
            other => ReservationError::RegistryError(other),
        })
}

/// 資源を予約する
///
/// ビジネスルール：
/// - 保有者が登録されていること
/// - 保有者の進行中予約数が会員区分の上限未満であること
/// - 照合キーに一致する空き資源が存在すること
/// - 期限 = 現在時刻 + 会員区分の期間
///
/// 資源が見つからない場合、手順2で確保した予約枠は解放（ロールバック）
/// してからエラーを返す。保有者の予約数不変条件はこの経路でも保たれる。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 予約コマンド
///
/// # 戻り値
/// 成功時は作成された進行中の取引
#[allow(dead_code)]
pub async fn reserve(deps: &ServiceDependencies, cmd: ReserveResource) -> Result<OpenReservation> {
    // 1. 保有者の存在確認
    let holder = deps
        .registry
        .get(cmd.holder_id)
        .await
        .map_err(ReservationError::RegistryError)?
        .ok_or(ReservationError::HolderNotFound)?;

    // 2. 予約枠の確保（上限との照合と加算は一体の操作）
    match deps
        .registry
        .reserve_slot(cmd.holder_id)
        .await
        .map_err(ReservationError::RegistryError)?
    {
        SlotClaim::Granted => {}
        SlotClaim::AtLimit => return Err(ReservationError::LimitExceeded),
    }

    // 3. 空き資源の検索。見つからなければ枠を解放してから報告する
    //    （代替資源は案内するだけで、勝手に予約はしない）
    let resource = match deps.catalog.find_available(&cmd.match_key).await {
        Ok(MatchOutcome::Found(resource)) => resource,
        Ok(MatchOutcome::Busy { alternate }) => {
            rollback_slot(deps, cmd.holder_id).await?;
            let alternate = alternate.map(|r| r.resource_id);
            tracing::debug!(key = cmd.match_key.as_str(), ?alternate, "no availability");
            return Err(ReservationError::ResourceUnavailable { alternate });
        }
        Ok(MatchOutcome::NoMatch) => {
            rollback_slot(deps, cmd.holder_id).await?;
            return Err(ReservationError::ResourceUnavailable { alternate: None });
        }
        Err(e) => {
            rollback_slot(deps, cmd.holder_id).await?;
            return Err(ReservationError::CatalogError(e));
        }
    };

    // 4. 資源を貸出中にする
    if let Err(e) = deps.catalog.mark_held(resource.resource_id).await {
        rollback_slot(deps, cmd.holder_id).await?;
        return Err(ReservationError::CatalogError(e));
    }

    // 5. 取引を作成して台帳に追記（IDの採番は台帳の書き込みと同じロック下）
    let transaction_id = deps
        .ledger
        .next_transaction_id()
        .await
        .map_err(ReservationError::LedgerError)?;

    let (entry, event) = reservation::open_reservation(
        transaction_id,
        resource.resource_id,
        cmd.holder_id,
        cmd.requested_at,
        holder.membership.period(),
        resource.base_cost,
        cmd.promo_code,
    );

    deps.ledger
        .append(entry.clone())
        .await
        .map_err(ReservationError::LedgerError)?;

    tracing::info!(
        transaction_id = event.transaction_id.value(),
        resource = %resource.name,
        holder = %holder.name,
        due_at = event.due_at.value(),
        "reservation opened"
    );

    Ok(entry)
}

/// 予約をクローズして最終費用を確定する
///
/// ビジネスルール：
/// - 取引が台帳に存在すること
/// - クローズは一度だけ。二度目は`AlreadyClosed`で、記録済みの費用は不変
/// - 延滞ユニット = max(0, 現在時刻 − 期限)
/// - 最終費用 = 基本料金 − 割引合計 + 延滞料金（0でクランプ）
///
/// クローズの確定後に資源を空きへ戻し、保有者の予約枠を解放する。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - クローズコマンド
///
/// # 戻り値
/// 成功時は費用内訳つきの精算結果
#[allow(dead_code)]
pub async fn close(deps: &ServiceDependencies, cmd: CloseReservation) -> Result<Settlement> {
    // 1. 台帳から取引を取得
    let entry = deps
        .ledger
        .get(cmd.transaction_id)
        .await
        .map_err(ReservationError::LedgerError)?
        .ok_or(ReservationError::TransactionNotFound)?;

    // 2. 進行中であることを確認（クローズ済みなら何も変更しない）
    let open = match entry {
        Reservation::Open(open) => open,
        Reservation::Closed(_) => return Err(ReservationError::AlreadyClosed),
    };

    // 3. 保有者の会員区分と割引ポリシーで費用を精算
    let holder = deps
        .registry
        .get(open.holder_id)
        .await
        .map_err(ReservationError::RegistryError)?
        .ok_or(ReservationError::HolderNotFound)?;

    let late_units = open.late_units(cmd.closed_at);
    let late_fee = holder.membership.late_fee(late_units);
    let facts = BillingFacts {
        held_for: open.held_for(cmd.closed_at),
        promo_code: open.promo_code.clone(),
    };
    let discount_total = billing::total_discount(open.base_cost, &facts, &deps.discount_policies);
    let final_cost = billing::final_cost(open.base_cost, discount_total, late_fee);

    let settlement = Settlement {
        transaction_id: open.transaction_id,
        base_cost: open.base_cost,
        discount_total,
        late_units,
        late_fee,
        final_cost,
    };

    // 4. ドメイン層の純粋関数でクローズ（終了時刻は以後不変）
    let resource_id = open.resource_id;
    let holder_id = open.holder_id;
    let (closed, event) =
        reservation::close_reservation(Reservation::Open(open), cmd.closed_at, final_cost)
            .map_err(|e| match e {
                CloseError::AlreadyClosed => ReservationError::AlreadyClosed,
            })?;

    // 5. 台帳に記録し、資源を空きへ戻し、予約枠を解放する
    deps.ledger
        .record_close(closed)
        .await
        .map_err(ReservationError::LedgerError)?;

    deps.catalog
        .mark_available(resource_id)
        .await
        .map_err(ReservationError::CatalogError)?;

    deps.registry
        .release_slot(holder_id)
        .await
        .map_err(|e| match e {
            RegistryError::CountUnderflow(_) => {
                ReservationError::LedgerInconsistency(e.to_string())
            }
            other => ReservationError::RegistryError(other),
        })?;

    tracing::info!(
        transaction_id = event.transaction_id.value(),
        final_cost = event.final_cost.value(),
        late_units = event.late_units,
        was_overdue = event.was_overdue,
        "reservation closed"
    );

    Ok(settlement)
}
