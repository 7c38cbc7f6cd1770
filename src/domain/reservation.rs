#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use super::{
    Amount, CloseError, HolderId, PromoCode, ReservationClosed, ReservationOpened, ResourceId,
    Tick, TransactionId,
};

// ============================================================================
// 型安全な状態パターン
// ============================================================================

/// 取引（台帳エントリ）の共通フィールド
///
/// OPEN・CLOSED両状態で共有されるコアデータ。
/// 期限は作成時に確定し、以後再計算されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationCore {
    // 識別子
    pub transaction_id: TransactionId,

    // 他の集約への参照（IDのみ）
    pub resource_id: ResourceId,
    pub holder_id: HolderId,

    // 時刻の事実
    pub started_at: Tick,
    pub due_at: Tick,

    // 課金の事実
    pub base_cost: Amount,
    pub promo_code: Option<PromoCode>,
}

/// 進行中状態
///
/// ビジネスルール：
/// - 最終費用は未確定
/// - 現在時刻が期限を過ぎていれば延滞
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenReservation {
    #[serde(flatten)]
    pub core: ReservationCore,
}

impl std::ops::Deref for OpenReservation {
    type Target = ReservationCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl OpenReservation {
    /// 延滞ユニット数（延滞していなければ0）
    pub fn late_units(&self, at: Tick) -> i64 {
        at.units_since(self.due_at).max(0)
    }

    /// 開始からの保持ユニット数
    pub fn held_for(&self, at: Tick) -> i64 {
        at.units_since(self.started_at)
    }
}

/// クローズ済み状態
///
/// ビジネスルール：
/// - 終了時刻と最終費用が必須（型で保証）
/// - 一度クローズされた取引は変更不可（読み取り専用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedReservation {
    #[serde(flatten)]
    pub core: ReservationCore,
    pub closed_at: Tick,
    pub final_cost: Amount,
}

impl std::ops::Deref for ClosedReservation {
    type Target = ReservationCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

/// 取引の統合型
///
/// 状態はOPEN→CLOSEDの一方向のみ。キャンセルという別経路は存在せず、
/// 期限前のクローズは単に延滞なしのクローズとなる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Reservation {
    Open(OpenReservation),
    Closed(ClosedReservation),
}

impl Reservation {
    pub fn transaction_id(&self) -> TransactionId {
        match self {
            Reservation::Open(open) => open.transaction_id,
            Reservation::Closed(closed) => closed.transaction_id,
        }
    }

    pub fn resource_id(&self) -> ResourceId {
        match self {
            Reservation::Open(open) => open.resource_id,
            Reservation::Closed(closed) => closed.resource_id,
        }
    }
}

// ============================================================================
// 純粋関数
// ============================================================================

/// 純粋関数：予約を開始する
///
/// ビジネスルール：
/// - 期限 = 開始時刻 + 会員区分の期間
/// - 期限は作成時に確定し、以後再計算されない
///
/// 副作用なし。新しいOpenReservationとイベントを返す。
pub fn open_reservation(
    transaction_id: TransactionId,
    resource_id: ResourceId,
    holder_id: HolderId,
    started_at: Tick,
    period: i64,
    base_cost: Amount,
    promo_code: Option<PromoCode>,
) -> (OpenReservation, ReservationOpened) {
    let due_at = started_at.advanced_by(period);

    let reservation = OpenReservation {
        core: ReservationCore {
            transaction_id,
            resource_id,
            holder_id,
            started_at,
            due_at,
            base_cost,
            promo_code,
        },
    };

    let event = ReservationOpened {
        transaction_id,
        resource_id,
        holder_id,
        started_at,
        due_at,
        base_cost,
    };

    (reservation, event)
}

/// 純粋関数：予約をクローズする
///
/// ビジネスルール：
/// - クローズは一度だけ。二度目は`CloseError::AlreadyClosed`
/// - 終了時刻は一度設定されたら不変
/// - 延滞していてもクローズは受け付ける
///
/// 最終費用は精算側で確定済みの値を受け取る。
/// 副作用なし。ClosedReservationとイベントを返す。
pub fn close_reservation(
    reservation: Reservation,
    closed_at: Tick,
    final_cost: Amount,
) -> Result<(ClosedReservation, ReservationClosed), CloseError> {
    match reservation {
        Reservation::Open(open) => {
            let transaction_id = open.transaction_id;
            let resource_id = open.resource_id;
            let holder_id = open.holder_id;
            let late_units = open.late_units(closed_at);

            let closed = ClosedReservation {
                core: open.core,
                closed_at,
                final_cost,
            };

            let event = ReservationClosed {
                transaction_id,
                resource_id,
                holder_id,
                closed_at,
                late_units,
                final_cost,
                was_overdue: late_units > 0,
            };

            Ok((closed, event))
        }
        Reservation::Closed(_) => Err(CloseError::AlreadyClosed),
    }
}

/// 純粋関数：延滞判定
///
/// 終了時刻がなく、かつ現在時刻が期限を過ぎている場合のみ延滞。
/// クローズ済みの取引は二度と延滞にならない。
pub fn is_overdue(reservation: &Reservation, at: Tick) -> bool {
    match reservation {
        Reservation::Open(open) => at > open.due_at,
        Reservation::Closed(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_at(started_at: i64, period: i64) -> (OpenReservation, ReservationOpened) {
        open_reservation(
            TransactionId::from_u64(1),
            ResourceId::new(),
            HolderId::new(),
            Tick::new(started_at),
            period,
            Amount::new(100),
            None,
        )
    }

    // TDD: open_reservation のテスト
    #[test]
    fn test_open_reservation_sets_due_from_period() {
        let (reservation, event) = open_at(1, 15);

        // 開始1・期間15なら期限は16
        assert_eq!(reservation.due_at, Tick::new(16));
        assert_eq!(reservation.started_at, Tick::new(1));
        assert_eq!(reservation.base_cost, Amount::new(100));

        // イベントの検証
        assert_eq!(event.transaction_id, reservation.transaction_id);
        assert_eq!(event.due_at, reservation.due_at);
        assert_eq!(event.base_cost, reservation.base_cost);
    }

    #[test]
    fn test_open_reservation_keeps_promo_code() {
        let (reservation, _) = open_reservation(
            TransactionId::from_u64(1),
            ResourceId::new(),
            HolderId::new(),
            Tick::new(1),
            30,
            Amount::new(100),
            Some(PromoCode::new("SAVE20")),
        );
        assert_eq!(reservation.promo_code, Some(PromoCode::new("SAVE20")));
    }

    // TDD: late_units / held_for のテスト
    #[test]
    fn test_late_units_after_due() {
        let (reservation, _) = open_at(1, 15);
        assert_eq!(reservation.late_units(Tick::new(20)), 4);
    }

    #[test]
    fn test_late_units_zero_before_due() {
        let (reservation, _) = open_at(1, 15);
        assert_eq!(reservation.late_units(Tick::new(10)), 0);
        assert_eq!(reservation.late_units(Tick::new(16)), 0);
    }

    #[test]
    fn test_held_for_counts_from_start() {
        let (reservation, _) = open_at(1, 15);
        assert_eq!(reservation.held_for(Tick::new(20)), 19);
    }

    // TDD: close_reservation のテスト
    #[test]
    fn test_close_reservation_success() {
        let (open, _) = open_at(1, 15);
        let transaction_id = open.transaction_id;

        let result = close_reservation(Reservation::Open(open), Tick::new(10), Amount::new(100));
        assert!(result.is_ok());

        let (closed, event) = result.unwrap();
        assert_eq!(closed.closed_at, Tick::new(10));
        assert_eq!(closed.final_cost, Amount::new(100));

        // イベントの検証
        assert_eq!(event.transaction_id, transaction_id);
        assert_eq!(event.late_units, 0);
        assert!(!event.was_overdue);
    }

    #[test]
    fn test_close_reservation_records_overdue_fact() {
        let (open, _) = open_at(1, 15);

        let (_, event) =
            close_reservation(Reservation::Open(open), Tick::new(20), Amount::new(120)).unwrap();
        assert_eq!(event.late_units, 4);
        assert!(event.was_overdue);
    }

    #[test]
    fn test_close_reservation_fails_when_already_closed() {
        let (open, _) = open_at(1, 15);
        let (closed, _) =
            close_reservation(Reservation::Open(open), Tick::new(10), Amount::new(100)).unwrap();

        // 2回目のクローズは失敗
        let result = close_reservation(
            Reservation::Closed(closed),
            Tick::new(11),
            Amount::new(999),
        );
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), CloseError::AlreadyClosed);
    }

    // TDD: is_overdue のテスト
    #[test]
    fn test_is_overdue_false_before_due() {
        let (open, _) = open_at(1, 15);
        assert!(!is_overdue(&Reservation::Open(open), Tick::new(16)));
    }

    #[test]
    fn test_is_overdue_true_after_due() {
        let (open, _) = open_at(1, 15);
        assert!(is_overdue(&Reservation::Open(open), Tick::new(17)));
    }

    #[test]
    fn test_is_overdue_false_when_closed() {
        let (open, _) = open_at(1, 15);
        let (closed, _) =
            close_reservation(Reservation::Open(open), Tick::new(20), Amount::new(120)).unwrap();
        assert!(!is_overdue(&Reservation::Closed(closed), Tick::new(100)));
    }
}
