#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use super::{Amount, MatchKey, ResourceId};

/// 空き状態エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    /// 確保できる在庫・枠がない
    Exhausted,
}

/// 資源の空き状態
///
/// 単体資源（書籍・車両・予約枠）は貸出中か空きかの二値。
/// 在庫資源（商品在庫）は残数を持ち、0未満にはならないことを
/// 型システムで保証する（残数はu32）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Availability {
    Unit { held: bool },
    Stock { on_hand: u32 },
}

impl Availability {
    /// 空きのある単体資源
    pub fn unit() -> Self {
        Availability::Unit { held: false }
    }

    /// 初期残数付きの在庫資源
    pub fn stock(on_hand: u32) -> Self {
        Availability::Stock { on_hand }
    }

    pub fn is_available(&self) -> bool {
        match self {
            Availability::Unit { held } => !held,
            Availability::Stock { on_hand } => *on_hand > 0,
        }
    }

    /// 1件確保した後の状態
    ///
    /// # エラー
    /// 貸出中の単体資源・残数0の在庫資源は`AvailabilityError::Exhausted`
    pub fn acquire(self) -> Result<Self, AvailabilityError> {
        match self {
            Availability::Unit { held: false } => Ok(Availability::Unit { held: true }),
            Availability::Unit { held: true } => Err(AvailabilityError::Exhausted),
            Availability::Stock { on_hand: 0 } => Err(AvailabilityError::Exhausted),
            Availability::Stock { on_hand } => Ok(Availability::Stock {
                on_hand: on_hand - 1,
            }),
        }
    }

    /// 1件解放した後の状態
    ///
    /// 空きの単体資源への解放は同じ値の再設定であり、エラーではなく無操作。
    pub fn restore(self) -> Self {
        match self {
            Availability::Unit { .. } => Availability::Unit { held: false },
            Availability::Stock { on_hand } => Availability::Stock {
                on_hand: on_hand + 1,
            },
        }
    }
}

/// 資源 - 予約可能な1単位
///
/// 名称・カテゴリ・副タグが照合キーの対象。`attributes`はドメイン固有
/// フィールド（ファイルサイズ、棚番号、燃料種別など）の不透明ペイロードで、
/// コアは中身を一切解釈しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub resource_id: ResourceId,
    pub name: String,
    pub category: String,
    pub tag: Option<String>,
    pub base_cost: Amount,
    pub availability: Availability,
    pub attributes: serde_json::Value,
}

impl Resource {
    /// 単体資源を作成する
    pub fn unit(name: impl Into<String>, category: impl Into<String>, base_cost: Amount) -> Self {
        Self {
            resource_id: ResourceId::new(),
            name: name.into(),
            category: category.into(),
            tag: None,
            base_cost,
            availability: Availability::unit(),
            attributes: serde_json::Value::Null,
        }
    }

    /// 在庫資源を作成する
    pub fn stock(
        name: impl Into<String>,
        category: impl Into<String>,
        base_cost: Amount,
        on_hand: u32,
    ) -> Self {
        Self {
            resource_id: ResourceId::new(),
            name: name.into(),
            category: category.into(),
            tag: None,
            base_cost,
            availability: Availability::stock(on_hand),
            attributes: serde_json::Value::Null,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_attributes(mut self, attributes: serde_json::Value) -> Self {
        self.attributes = attributes;
        self
    }

    /// 照合キーとの一致判定
    ///
    /// 名称の完全一致・カテゴリ・副タグのいずれかに一致すればよい。
    pub fn matches(&self, key: &MatchKey) -> bool {
        self.name == key.as_str()
            || self.category == key.as_str()
            || self.tag.as_deref() == Some(key.as_str())
    }
}
