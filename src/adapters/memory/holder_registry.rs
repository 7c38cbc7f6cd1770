use crate::domain::holder::{self, Holder};
use crate::domain::{HolderId, SlotError};
use crate::ports::holder_registry::{
    HolderRegistry as HolderRegistryTrait, RegistryError, Result, SlotClaim,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// HolderRegistryのインメモリ実装
///
/// 上限との照合と加算はMutexの下で一体に行われ、呼び出し側から見て
/// 単一の不可分な操作になる。
#[allow(dead_code)]
pub struct HolderRegistry {
    holders: Mutex<HashMap<HolderId, Holder>>,
}

#[allow(dead_code)]
impl HolderRegistry {
    pub fn new() -> Self {
        Self {
            holders: Mutex::new(HashMap::new()),
        }
    }

    /// 起動時の投入用に保有者を登録する
    pub fn register(&self, holder: Holder) -> HolderId {
        let holder_id = holder.holder_id;
        self.holders.lock().unwrap().insert(holder_id, holder);
        holder_id
    }
}

impl Default for HolderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HolderRegistryTrait for HolderRegistry {
    async fn get(&self, holder_id: HolderId) -> Result<Option<Holder>> {
        Ok(self.holders.lock().unwrap().get(&holder_id).cloned())
    }

    /// 照合と加算を1つのロック区間で行う
    async fn reserve_slot(&self, holder_id: HolderId) -> Result<SlotClaim> {
        let mut holders = self.holders.lock().unwrap();
        let holder = holders
            .get(&holder_id)
            .ok_or(RegistryError::UnknownHolder(holder_id))?;

        match holder::claim_slot(holder) {
            Ok(updated) => {
                holders.insert(holder_id, updated);
                Ok(SlotClaim::Granted)
            }
            Err(SlotError::LimitReached) => Ok(SlotClaim::AtLimit),
            Err(SlotError::Underflow) => Err(RegistryError::CountUnderflow(holder_id)),
        }
    }

    async fn release_slot(&self, holder_id: HolderId) -> Result<()> {
        let mut holders = self.holders.lock().unwrap();
        let holder = holders
            .get(&holder_id)
            .ok_or(RegistryError::UnknownHolder(holder_id))?;

        match holder::release_slot(holder) {
            Ok(updated) => {
                holders.insert(holder_id, updated);
                Ok(())
            }
            // 0からの解放は台帳不整合。黙って0に丸めたりはしない
            Err(_) => Err(RegistryError::CountUnderflow(holder_id)),
        }
    }
}
