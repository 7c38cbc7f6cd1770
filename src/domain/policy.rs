#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use super::{Amount, PromoCode, ReservationLimit};

/// 会員区分 - 保有者クラスごとの予約ポリシー
///
/// 上限・期間・延滞料率は区分ごとの固定値であり、計算ではなく参照で決まる。
/// 区分は閉じたバリアント集合として表現し、実行時の型判定による分岐を排除する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Membership {
    Student,
    Regular,
    Premium,
}

impl Membership {
    /// 同時予約数の上限
    ///
    /// Premiumは無制限（番兵値ではなく`Unlimited`）。
    pub fn reservation_limit(&self) -> ReservationLimit {
        match self {
            Membership::Student => ReservationLimit::Capped(3),
            Membership::Regular => ReservationLimit::Capped(5),
            Membership::Premium => ReservationLimit::Unlimited,
        }
    }

    /// 既定の予約期間（ユニット数）
    pub fn period(&self) -> i64 {
        match self {
            Membership::Student => 15,
            Membership::Regular => 30,
            Membership::Premium => 45,
        }
    }

    /// 延滞料金
    ///
    /// 延滞ユニット × 区分ごとの単価。延滞していなければ0。
    /// Premiumは延滞料金なし。
    pub fn late_fee(&self, late_units: i64) -> Amount {
        let rate: u64 = match self {
            Membership::Student => 5,
            Membership::Regular => 10,
            Membership::Premium => 0,
        };
        Amount::new(rate * late_units.max(0) as u64)
    }
}

/// 精算時に割引ポリシーが参照する取引の事実
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingFacts {
    /// 開始からクローズまでの保持ユニット数
    pub held_for: i64,
    /// 予約時に提示されたプロモーションコード
    pub promo_code: Option<PromoCode>,
}

/// 割引ポリシー
///
/// 純粋な戦略で可変状態を持たない。各ポリシーの寄与は独立に計算され、
/// 合算は順序に依存しない。延滞料金とは一切相互作用しない。
pub trait DiscountPolicy: Send + Sync {
    /// この取引に対する割引額（条件を満たさなければ0）
    fn discount(&self, base_cost: Amount, facts: &BillingFacts) -> Amount;
}

/// 長期利用割引 - 保持期間がしきい値を超えた場合のみ適用
#[derive(Debug, Clone)]
pub struct LongDurationDiscount {
    pub min_units: i64,
    pub percent: u32,
}

impl LongDurationDiscount {
    pub fn new(min_units: i64, percent: u32) -> Self {
        Self { min_units, percent }
    }
}

impl Default for LongDurationDiscount {
    /// 24ユニット超で10%
    fn default() -> Self {
        Self::new(24, 10)
    }
}

impl DiscountPolicy for LongDurationDiscount {
    fn discount(&self, base_cost: Amount, facts: &BillingFacts) -> Amount {
        if facts.held_for > self.min_units {
            base_cost.percentage(self.percent)
        } else {
            Amount::ZERO
        }
    }
}

/// シーズン割引 - 条件なしの一律割引
#[derive(Debug, Clone)]
pub struct SeasonalDiscount {
    pub percent: u32,
}

impl SeasonalDiscount {
    pub fn new(percent: u32) -> Self {
        Self { percent }
    }
}

impl Default for SeasonalDiscount {
    /// 一律5%
    fn default() -> Self {
        Self::new(5)
    }
}

impl DiscountPolicy for SeasonalDiscount {
    fn discount(&self, base_cost: Amount, _facts: &BillingFacts) -> Amount {
        base_cost.percentage(self.percent)
    }
}

/// プロモーションコード割引 - 設定されたコードの提示時のみ適用
#[derive(Debug, Clone)]
pub struct PromoCodeDiscount {
    pub code: PromoCode,
    pub percent: u32,
}

impl PromoCodeDiscount {
    pub fn new(code: PromoCode, percent: u32) -> Self {
        Self { code, percent }
    }
}

impl DiscountPolicy for PromoCodeDiscount {
    fn discount(&self, base_cost: Amount, facts: &BillingFacts) -> Amount {
        match &facts.promo_code {
            Some(code) if *code == self.code => base_cost.percentage(self.percent),
            _ => Amount::ZERO,
        }
    }
}
