pub mod holder_registry;
pub mod ledger;
pub mod resource_catalog;

#[allow(unused_imports)]
pub use holder_registry::HolderRegistry;
#[allow(unused_imports)]
pub use ledger::Ledger;
#[allow(unused_imports)]
pub use resource_catalog::ResourceCatalog;
