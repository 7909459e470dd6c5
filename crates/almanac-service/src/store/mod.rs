//! The backing-store contract consumed by the protocol layer.
//!
//! The store owns events, collections and principals. The protocol layer
//! only issues single logical reads and writes through [`BackingStore`] and
//! never caches what it gets back across requests.

mod etag;
mod memory;

use almanac_core::model::{Collection, Event, Principal, ResourceMetadata};
use async_trait::async_trait;
use thiserror::Error;

pub use etag::generate_etag;
pub use memory::InMemoryStore;

/// Failures reported by a backing store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store could not render the canonical form of an event.
    #[error("Failed to encode stored event: {0}")]
    Encode(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Identity attached to a request by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user: String,
}

impl RequestContext {
    #[must_use]
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }
}

/// An event together with the store's bookkeeping for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEvent {
    pub event: Event,
    pub metadata: ResourceMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutResult {
    pub outcome: PutOutcome,
    pub metadata: ResourceMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Storage of principals, their collections and the events inside them.
///
/// Collections are scoped to their owning principal; `owner` is the
/// principal's user name. Implementations serialize mutations of a single
/// object themselves.
#[async_trait]
pub trait BackingStore: Send + Sync + std::fmt::Debug {
    /// ## Summary
    /// Returns the principal a request acts as, provisioning it on first use.
    ///
    /// ## Errors
    /// Returns an error if the store is unavailable.
    async fn current_principal(&self, ctx: &RequestContext) -> StoreResult<Principal>;

    /// ## Errors
    /// Returns an error if the store is unavailable.
    async fn get_principal(&self, name: &str) -> StoreResult<Option<Principal>>;

    /// ## Errors
    /// Returns an error if the store is unavailable.
    async fn get_collection_metadata(
        &self,
        owner: &str,
        collection_id: &str,
    ) -> StoreResult<Option<Collection>>;

    /// Lists every collection of `owner`, calendars first.
    ///
    /// ## Errors
    /// Returns an error if the store is unavailable.
    async fn list_collections(&self, owner: &str) -> StoreResult<Vec<Collection>>;

    /// Lists the objects of a collection in resource name order.
    ///
    /// ## Errors
    /// Returns `StoreError::CollectionNotFound` if the collection does not exist.
    async fn list_objects(&self, owner: &str, collection_id: &str) -> StoreResult<Vec<ResourceMetadata>>;

    /// ## Errors
    /// Returns an error if the store is unavailable.
    async fn get_event(
        &self,
        owner: &str,
        collection_id: &str,
        object_id: &str,
    ) -> StoreResult<Option<StoredEvent>>;

    /// ## Summary
    /// Creates or fully replaces the event stored under `object_id`.
    ///
    /// The returned metadata carries a fresh entity tag and the collection's
    /// change token is replaced.
    ///
    /// ## Errors
    /// Returns `StoreError::CollectionNotFound` if the collection does not exist.
    async fn put_event(
        &self,
        owner: &str,
        collection_id: &str,
        object_id: &str,
        event: Event,
    ) -> StoreResult<PutResult>;

    /// ## Summary
    /// Removes the event stored under `object_id`, if any.
    ///
    /// A missing object, or a missing collection, is `DeleteOutcome::NotFound`.
    ///
    /// ## Errors
    /// Returns an error if the store is unavailable.
    async fn delete_event(
        &self,
        owner: &str,
        collection_id: &str,
        object_id: &str,
    ) -> StoreResult<DeleteOutcome>;
}
