use crate::domain::resource::Resource;
use crate::domain::{MatchKey, ResourceId};
use async_trait::async_trait;
use thiserror::Error;

/// Catalog failures surfaced to the application layer.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown resource: {0:?}")]
    UnknownResource(ResourceId),

    /// Marking a resource held when it has nothing left to give.
    #[error("resource {0:?} has no availability left")]
    Exhausted(ResourceId),
}

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Outcome of an availability lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// The first available resource matching the key, in catalog
    /// insertion order. Ties are not ranked: first match wins.
    Found(Resource),

    /// The key matched something, but every match is currently held.
    /// The alternate, when present, is an available resource sharing a
    /// category with an exactly-named match — reported as a hint,
    /// never booked on the caller's behalf.
    Busy { alternate: Option<Resource> },

    /// Nothing in the catalog matches the key.
    NoMatch,
}

/// Resource Catalog port.
///
/// The catalog owns availability state. Lookups never mutate; mutation
/// goes through mark_held/mark_available, and a failed lookup is
/// reported to the caller rather than retried internally.
#[allow(dead_code)]
#[async_trait]
pub trait ResourceCatalog: Send + Sync {
    /// Scan the catalog in insertion order for the first available
    /// resource matching the key (by name, category, or secondary tag).
    async fn find_available(&self, key: &MatchKey) -> Result<MatchOutcome>;

    /// Take one unit of availability from a resource.
    ///
    /// A unit resource flips to held; a stock resource decrements.
    /// Fails with `Exhausted` when nothing is left — the caller is
    /// expected to have observed availability first.
    async fn mark_held(&self, resource_id: ResourceId) -> Result<()>;

    /// Give one unit of availability back to a resource.
    ///
    /// Re-marking an already-available unit resource is a no-op,
    /// not an error.
    async fn mark_available(&self, resource_id: ResourceId) -> Result<()>;

    /// Fetch a resource by id.
    async fn get(&self, resource_id: ResourceId) -> Result<Option<Resource>>;
}
