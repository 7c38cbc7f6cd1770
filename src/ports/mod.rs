#[allow(unused_imports)]
pub mod holder_registry;
#[allow(unused_imports)]
pub mod ledger;
#[allow(unused_imports)]
pub mod resource_catalog;

#[allow(unused_imports)]
pub use holder_registry::*;
#[allow(unused_imports)]
pub use ledger::*;
#[allow(unused_imports)]
pub use resource_catalog::*;
