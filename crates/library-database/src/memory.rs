//! In-memory document store backed by `dashmap`.
//!
//! Used for development and tests. Documents are kept per collection in a
//! `BTreeMap` keyed by id; ids are UUIDv7 so iteration order is creation
//! order.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use library_core::result::AppResult;
use library_core::traits::DocumentStore;
use library_core::types::Filter;

/// Process-local document store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<DashMap<String, BTreeMap<Uuid, Value>>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_by_id(&self, collection: &str, id: Uuid) -> AppResult<Option<Value>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(&id).cloned()))
    }

    async fn find(&self, collection: &str, filter: &Filter) -> AppResult<Vec<Value>> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> AppResult<Option<Value>> {
        Ok(self.collections.get(collection).and_then(|docs| {
            docs.values().find(|doc| filter.matches(doc)).cloned()
        }))
    }

    async fn save(&self, collection: &str, id: Uuid, document: Value) -> AppResult<Uuid> {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, document);
        debug!(collection, %id, "Saved document");
        Ok(id)
    }

    async fn find_by_id_and_update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Value,
    ) -> AppResult<()> {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return Ok(());
        };
        if let (Some(Value::Object(target)), Value::Object(changes)) = (docs.get_mut(&id), patch)
        {
            target.extend(changes);
            debug!(collection, %id, "Updated document");
        }
        Ok(())
    }

    async fn find_by_id_and_remove(&self, collection: &str, id: Uuid) -> AppResult<()> {
        if let Some(mut docs) = self.collections.get_mut(collection) {
            if docs.remove(&id).is_some() {
                debug!(collection, %id, "Removed document");
            }
        }
        Ok(())
    }

    async fn count_documents(&self, collection: &str, filter: &Filter) -> AppResult<u64> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| docs.values().filter(|doc| filter.matches(doc)).count() as u64)
            .unwrap_or(0))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
