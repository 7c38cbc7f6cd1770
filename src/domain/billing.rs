#![allow(dead_code)]

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::policy::{BillingFacts, DiscountPolicy};
use super::{Amount, TransactionId};

/// 精算結果 - クローズ時に確定する費用の内訳
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub transaction_id: TransactionId,
    pub base_cost: Amount,
    pub discount_total: Amount,
    pub late_units: i64,
    pub late_fee: Amount,
    pub final_cost: Amount,
}

/// 純粋関数：割引の合算
///
/// 各ポリシーの寄与を独立に計算して合計する。順序に依存しない。
pub fn total_discount(
    base_cost: Amount,
    facts: &BillingFacts,
    policies: &[Arc<dyn DiscountPolicy>],
) -> Amount {
    policies
        .iter()
        .fold(Amount::ZERO, |acc, policy| {
            acc.plus(policy.discount(base_cost, facts))
        })
}

/// 純粋関数：最終費用の確定
///
/// 最終費用 = 基本料金 − 割引合計 + 延滞料金。0未満には決してならない
/// （割引合計が基本料金を超えてもクランプされる）。クランプは合算後に
/// 一度だけ行い、項ごとには行わない。
pub fn final_cost(base_cost: Amount, discount_total: Amount, late_fee: Amount) -> Amount {
    let net = i128::from(base_cost.value()) - i128::from(discount_total.value())
        + i128::from(late_fee.value());
    Amount::new(net.max(0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::{LongDurationDiscount, SeasonalDiscount};

    fn facts(held_for: i64) -> BillingFacts {
        BillingFacts {
            held_for,
            promo_code: None,
        }
    }

    // TDD: total_discount のテスト
    #[test]
    fn test_two_stacked_discounts_sum_their_contributions() {
        // 10% + 5% を1000に適用すると割引合計150
        let policies: Vec<Arc<dyn DiscountPolicy>> = vec![
            Arc::new(LongDurationDiscount::default()),
            Arc::new(SeasonalDiscount::default()),
        ];
        let discount = total_discount(Amount::new(1000), &facts(30), &policies);
        assert_eq!(discount, Amount::new(150));
    }

    #[test]
    fn test_discount_stacking_is_order_independent() {
        let forward: Vec<Arc<dyn DiscountPolicy>> = vec![
            Arc::new(LongDurationDiscount::default()),
            Arc::new(SeasonalDiscount::default()),
        ];
        let reversed: Vec<Arc<dyn DiscountPolicy>> = vec![
            Arc::new(SeasonalDiscount::default()),
            Arc::new(LongDurationDiscount::default()),
        ];
        assert_eq!(
            total_discount(Amount::new(1000), &facts(30), &forward),
            total_discount(Amount::new(1000), &facts(30), &reversed)
        );
    }

    #[test]
    fn test_no_policies_means_no_discount() {
        assert_eq!(
            total_discount(Amount::new(1000), &facts(30), &[]),
            Amount::ZERO
        );
    }

    // TDD: final_cost のテスト
    #[test]
    fn test_final_cost_subtracts_discount_and_adds_fee() {
        let cost = final_cost(Amount::new(1000), Amount::new(150), Amount::ZERO);
        assert_eq!(cost, Amount::new(850));
    }

    #[test]
    fn test_final_cost_with_late_fee_only() {
        let cost = final_cost(Amount::new(100), Amount::ZERO, Amount::new(20));
        assert_eq!(cost, Amount::new(120));
    }

    #[test]
    fn test_final_cost_clamped_at_zero() {
        // 割引合計が100%を超えても0未満にはならない
        let cost = final_cost(Amount::new(1000), Amount::new(1500), Amount::ZERO);
        assert_eq!(cost, Amount::ZERO);
    }

    #[test]
    fn test_final_cost_clamp_happens_after_fee() {
        // クランプは合算後：1000 − 1500 + 600 = 100（項ごとの切り捨てではない）
        let cost = final_cost(Amount::new(1000), Amount::new(1500), Amount::new(600));
        assert_eq!(cost, Amount::new(100));
    }
}
