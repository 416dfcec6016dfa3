//! Persistence facade over an external document store.
//!
//! The application never issues store-specific queries; every read and
//! write goes through the narrow [`DocumentStore`] capability so that any
//! conforming backend can be plugged in.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::filter::Filter;

/// Untyped document store operations, grouped by collection name.
///
/// Documents are JSON objects. Every call may fail with a store error;
/// implementations do not retry.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Look a document up by id.
    async fn find_by_id(&self, collection: &str, id: Uuid) -> AppResult<Option<Value>>;

    /// Return every document matching the filter, oldest first.
    async fn find(&self, collection: &str, filter: &Filter) -> AppResult<Vec<Value>>;

    /// Return the oldest document matching the filter.
    async fn find_one(&self, collection: &str, filter: &Filter) -> AppResult<Option<Value>>;

    /// Insert or replace the document stored under `id`. Returns the id.
    async fn save(&self, collection: &str, id: Uuid, document: Value) -> AppResult<Uuid>;

    /// Merge the top-level keys of `patch` into the stored document.
    /// Updating a missing document is a no-op.
    async fn find_by_id_and_update(&self, collection: &str, id: Uuid, patch: Value)
    -> AppResult<()>;

    /// Delete the document stored under `id`. Removing a missing document is
    /// a no-op.
    async fn find_by_id_and_remove(&self, collection: &str, id: Uuid) -> AppResult<()>;

    /// Count documents matching the filter.
    async fn count_documents(&self, collection: &str, filter: &Filter) -> AppResult<u64>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// A typed entity persisted as one document in a named collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection the entity lives in.
    const COLLECTION: &'static str;

    /// The entity's identifier as a raw UUID.
    fn document_id(&self) -> Uuid;
}
