//! PostgreSQL document store.
//!
//! All collections share the `documents` table; filters are evaluated with
//! `jsonb` containment (`body @> pattern`) and updates merge top-level keys
//! with `body || patch`.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use library_core::error::{AppError, ErrorKind};
use library_core::result::AppResult;
use library_core::traits::DocumentStore;
use library_core::types::Filter;

/// Document store over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a new store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map an sqlx failure to a store error; unique violations become conflicts.
fn store_error(context: &str, err: sqlx::Error) -> AppError {
    let unique_violation = err
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505");
    let kind = if unique_violation {
        ErrorKind::Conflict
    } else {
        ErrorKind::Store
    };
    AppError::with_source(kind, format!("{context}: {err}"), err)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_by_id(&self, collection: &str, id: Uuid) -> AppResult<Option<Value>> {
        sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to find document by id", e))
    }

    async fn find(&self, collection: &str, filter: &Filter) -> AppResult<Vec<Value>> {
        sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 AND body @> $2 ORDER BY id",
        )
        .bind(collection)
        .bind(filter.containment())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to query documents", e))
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> AppResult<Option<Value>> {
        sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 AND body @> $2 ORDER BY id LIMIT 1",
        )
        .bind(collection)
        .bind(filter.containment())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to query document", e))
    }

    async fn save(&self, collection: &str, id: Uuid, document: Value) -> AppResult<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id)
            DO UPDATE SET body = EXCLUDED.body, updated_at = NOW()
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to save document", e))?;

        debug!(collection, %id, "Saved document");
        Ok(id)
    }

    async fn find_by_id_and_update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Value,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE documents SET body = body || $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(patch)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to update document", e))?;
        Ok(())
    }

    async fn find_by_id_and_remove(&self, collection: &str, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to remove document", e))?;
        Ok(())
    }

    async fn count_documents(&self, collection: &str, filter: &Filter) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM documents WHERE collection = $1 AND body @> $2",
        )
        .bind(collection)
        .bind(filter.containment())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Failed to count documents", e))?;
        Ok(count as u64)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Store, "Health check failed", e))
    }
}
