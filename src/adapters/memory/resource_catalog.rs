use crate::domain::resource::Resource;
use crate::domain::{MatchKey, ResourceId};
use crate::ports::resource_catalog::{
    CatalogError, MatchOutcome, ResourceCatalog as ResourceCatalogTrait, Result,
};
use async_trait::async_trait;
use std::sync::Mutex;

/// ResourceCatalogのインメモリ実装
///
/// 資源は登録順のVecで保持し、照合の走査順＝カタログ登録順を保証する。
/// 全状態を1つのMutexで守るため、空き状態の確認と変更は直列化される。
#[allow(dead_code)]
pub struct ResourceCatalog {
    resources: Mutex<Vec<Resource>>,
}

#[allow(dead_code)]
impl ResourceCatalog {
    pub fn new() -> Self {
        Self {
            resources: Mutex::new(Vec::new()),
        }
    }

    /// 起動時のカタログ投入用に資源を登録する
    pub fn register(&self, resource: Resource) -> ResourceId {
        let resource_id = resource.resource_id;
        self.resources.lock().unwrap().push(resource);
        resource_id
    }

    /// 現在のカタログのスナップショット（登録順）
    pub fn snapshot(&self) -> Vec<Resource> {
        self.resources.lock().unwrap().clone()
    }
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceCatalogTrait for ResourceCatalog {
    /// 登録順に走査し、最初に一致した空き資源を返す
    async fn find_available(&self, key: &MatchKey) -> Result<MatchOutcome> {
        let resources = self.resources.lock().unwrap();

        // 最初の一致が勝つ。順位付けはしない
        if let Some(found) = resources
            .iter()
            .find(|r| r.matches(key) && r.availability.is_available())
        {
            return Ok(MatchOutcome::Found(found.clone()));
        }

        // 一致する資源がそもそもない
        if !resources.iter().any(|r| r.matches(key)) {
            return Ok(MatchOutcome::NoMatch);
        }

        // 一致はあるがすべて貸出中。名称で完全一致した資源とカテゴリを
        // 共有する空き資源があれば、代替として案内する（予約はしない）
        let alternate = resources
            .iter()
            .filter(|r| r.name == key.as_str() && !r.availability.is_available())
            .find_map(|held| {
                resources.iter().find(|r| {
                    r.resource_id != held.resource_id
                        && r.category == held.category
                        && r.availability.is_available()
                })
            })
            .cloned();

        Ok(MatchOutcome::Busy { alternate })
    }

    async fn mark_held(&self, resource_id: ResourceId) -> Result<()> {
        let mut resources = self.resources.lock().unwrap();
        let resource = resources
            .iter_mut()
            .find(|r| r.resource_id == resource_id)
            .ok_or(CatalogError::UnknownResource(resource_id))?;

        resource.availability = resource
            .availability
            .acquire()
            .map_err(|_| CatalogError::Exhausted(resource_id))?;
        Ok(())
    }

    async fn mark_available(&self, resource_id: ResourceId) -> Result<()> {
        let mut resources = self.resources.lock().unwrap();
        let resource = resources
            .iter_mut()
            .find(|r| r.resource_id == resource_id)
            .ok_or(CatalogError::UnknownResource(resource_id))?;

        resource.availability = resource.availability.restore();
        Ok(())
    }

    async fn get(&self, resource_id: ResourceId) -> Result<Option<Resource>> {
        let resources = self.resources.lock().unwrap();
        Ok(resources
            .iter()
            .find(|r| r.resource_id == resource_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Amount;

    // TDD: find_available のテスト
    #[tokio::test]
    async fn test_find_available_first_match_in_insertion_order_wins() {
        let catalog = ResourceCatalog::new();
        let first = catalog.register(Resource::unit("Physics", "Science", Amount::new(100)));
        catalog.register(Resource::unit("Chemistry", "Science", Amount::new(100)));

        // カテゴリ照合でも先に登録した方が返る
        let outcome = catalog
            .find_available(&MatchKey::new("Science"))
            .await
            .unwrap();
        match outcome {
            MatchOutcome::Found(resource) => assert_eq!(resource.resource_id, first),
            other => panic!("Expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_available_skips_held_resources() {
        let catalog = ResourceCatalog::new();
        let first = catalog.register(Resource::unit("Physics", "Science", Amount::new(100)));
        let second = catalog.register(Resource::unit("Chemistry", "Science", Amount::new(100)));

        catalog.mark_held(first).await.unwrap();

        let outcome = catalog
            .find_available(&MatchKey::new("Science"))
            .await
            .unwrap();
        match outcome {
            MatchOutcome::Found(resource) => assert_eq!(resource.resource_id, second),
            other => panic!("Expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_available_no_match() {
        let catalog = ResourceCatalog::new();
        catalog.register(Resource::unit("Physics", "Science", Amount::new(100)));

        let outcome = catalog
            .find_available(&MatchKey::new("Cooking"))
            .await
            .unwrap();
        assert_eq!(outcome, MatchOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_find_available_busy_reports_category_alternate() {
        // 名指しの資源が貸出中でも、同カテゴリの空き資源を案内するだけで
        // 勝手に予約はしない
        let catalog = ResourceCatalog::new();
        let sharma = catalog.register(
            Resource::unit("Dr. Sharma", "Cardiologist", Amount::new(500)),
        );
        let rao = catalog.register(Resource::unit("Dr. Rao", "Cardiologist", Amount::new(600)));

        catalog.mark_held(sharma).await.unwrap();

        let outcome = catalog
            .find_available(&MatchKey::new("Dr. Sharma"))
            .await
            .unwrap();
        match outcome {
            MatchOutcome::Busy { alternate } => {
                assert_eq!(alternate.map(|r| r.resource_id), Some(rao));
            }
            other => panic!("Expected Busy, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_available_busy_without_alternate() {
        // カテゴリ照合で全滅した場合、名指しの一致がないのでヒントもない
        let catalog = ResourceCatalog::new();
        let only = catalog.register(Resource::unit("Dr. Mehta", "Dermatologist", Amount::new(300)));
        catalog.mark_held(only).await.unwrap();

        let outcome = catalog
            .find_available(&MatchKey::new("Dermatologist"))
            .await
            .unwrap();
        assert_eq!(outcome, MatchOutcome::Busy { alternate: None });
    }

    // TDD: mark_held / mark_available のテスト
    #[tokio::test]
    async fn test_mark_held_exhausted_resource_fails() {
        let catalog = ResourceCatalog::new();
        let id = catalog.register(Resource::unit("Physics", "Science", Amount::new(100)));

        catalog.mark_held(id).await.unwrap();
        let result = catalog.mark_held(id).await;
        assert!(matches!(result, Err(CatalogError::Exhausted(_))));
    }

    #[tokio::test]
    async fn test_mark_available_is_idempotent_for_unit_resources() {
        let catalog = ResourceCatalog::new();
        let id = catalog.register(Resource::unit("Physics", "Science", Amount::new(100)));

        // 空き状態への再設定は無操作であってエラーではない
        catalog.mark_available(id).await.unwrap();
        let resource = catalog.get(id).await.unwrap().unwrap();
        assert!(resource.availability.is_available());
    }

    #[tokio::test]
    async fn test_stock_resource_counts_down_and_up() {
        let catalog = ResourceCatalog::new();
        let id = catalog.register(Resource::stock("T-Shirt", "Clothing", Amount::new(1000), 2));

        catalog.mark_held(id).await.unwrap();
        catalog.mark_held(id).await.unwrap();
        assert!(matches!(
            catalog.mark_held(id).await,
            Err(CatalogError::Exhausted(_))
        ));

        catalog.mark_available(id).await.unwrap();
        let resource = catalog.get(id).await.unwrap().unwrap();
        assert!(resource.availability.is_available());
    }

    #[tokio::test]
    async fn test_unknown_resource_is_an_error() {
        let catalog = ResourceCatalog::new();
        let result = catalog.mark_held(ResourceId::new()).await;
        assert!(matches!(result, Err(CatalogError::UnknownResource(_))));
    }
}
