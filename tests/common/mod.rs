#![allow(dead_code)]

use std::sync::Arc;

use rusty_reservation_ddd::adapters::memory::{HolderRegistry, Ledger, ResourceCatalog};
use rusty_reservation_ddd::application::reservation::ServiceDependencies;
use rusty_reservation_ddd::domain::policy::DiscountPolicy;

/// テスト用の依存関係一式
///
/// インメモリアダプタへの具象ハンドルを残しておくことで、
/// テストからカタログ投入や台帳スナップショットの検証ができる。
pub struct TestContext {
    pub catalog: Arc<ResourceCatalog>,
    pub registry: Arc<HolderRegistry>,
    pub ledger: Arc<Ledger>,
    pub deps: ServiceDependencies,
}

/// 割引ポリシーなしの構成
pub fn setup() -> TestContext {
    setup_with_discounts(Vec::new())
}

/// 指定した割引ポリシー集合での構成
pub fn setup_with_discounts(discount_policies: Vec<Arc<dyn DiscountPolicy>>) -> TestContext {
    let catalog = Arc::new(ResourceCatalog::new());
    let registry = Arc::new(HolderRegistry::new());
    let ledger = Arc::new(Ledger::new());

    let deps = ServiceDependencies {
        catalog: catalog.clone(),
        registry: registry.clone(),
        ledger: ledger.clone(),
        discount_policies,
    };

    TestContext {
        catalog,
        registry,
        ledger,
        deps,
    }
}

/// テストログの初期化（RUST_LOGで制御。2回目以降の呼び出しは無視される）
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
