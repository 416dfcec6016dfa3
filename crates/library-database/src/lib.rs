//! # library-database
//!
//! Implementations of the [`DocumentStore`](library_core::traits::DocumentStore)
//! persistence facade: an in-memory store for development and tests, and a
//! PostgreSQL store that keeps every entity as a JSONB document. Also
//! provides the typed [`Repository`] wrapper used by the services.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repository;

use std::sync::Arc;

use tracing::info;

use library_core::config::{DatabaseConfig, StoreProvider};
use library_core::result::AppResult;
use library_core::traits::DocumentStore;

pub use connection::DatabasePool;
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use repository::Repository;

/// Open the document store selected by configuration.
///
/// For PostgreSQL this connects the pool and, when enabled, applies pending
/// migrations before returning.
pub async fn open_store(config: &DatabaseConfig) -> AppResult<Arc<dyn DocumentStore>> {
    match config.provider {
        StoreProvider::Memory => {
            info!("Using in-memory document store");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
        StoreProvider::Postgres => {
            let pool = DatabasePool::connect(config).await?;
            if config.run_migrations {
                migration::run_migrations(pool.pool()).await?;
            }
            Ok(Arc::new(PgDocumentStore::new(pool.into_pool())))
        }
    }
}
