//! Typed repository over the untyped document store.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use library_core::error::AppError;
use library_core::result::AppResult;
use library_core::traits::{Document, DocumentStore};
use library_core::types::Filter;

/// Typed access to one entity collection.
///
/// Cheap to clone; all repositories share the same store handle.
#[derive(Debug)]
pub struct Repository<E: Document> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Document> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<E: Document> Repository<E> {
    /// Create a repository over a shared store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Find an entity by id.
    pub async fn find_by_id(&self, id: impl Into<Uuid>) -> AppResult<Option<E>> {
        self.store
            .find_by_id(E::COLLECTION, id.into())
            .await?
            .map(serde_json::from_value::<E>)
            .transpose()
            .map_err(AppError::from)
    }

    /// Find all entities matching the filter, oldest first.
    pub async fn find(&self, filter: &Filter) -> AppResult<Vec<E>> {
        self.store
            .find(E::COLLECTION, filter)
            .await?
            .into_iter()
            .map(|doc| serde_json::from_value::<E>(doc).map_err(AppError::from))
            .collect()
    }

    /// Find all entities in the collection.
    pub async fn find_all(&self) -> AppResult<Vec<E>> {
        self.find(&Filter::all()).await
    }

    /// Find the first entity matching the filter.
    pub async fn find_one(&self, filter: &Filter) -> AppResult<Option<E>> {
        self.store
            .find_one(E::COLLECTION, filter)
            .await?
            .map(serde_json::from_value::<E>)
            .transpose()
            .map_err(AppError::from)
    }

    /// Insert or replace the entity.
    pub async fn save(&self, entity: &E) -> AppResult<Uuid> {
        let document = serde_json::to_value(entity)?;
        self.store
            .save(E::COLLECTION, entity.document_id(), document)
            .await
    }

    /// Merge a partial document into the stored entity.
    pub async fn update(&self, id: impl Into<Uuid>, patch: Value) -> AppResult<()> {
        self.store
            .find_by_id_and_update(E::COLLECTION, id.into(), patch)
            .await
    }

    /// Remove the entity.
    pub async fn remove(&self, id: impl Into<Uuid>) -> AppResult<()> {
        self.store
            .find_by_id_and_remove(E::COLLECTION, id.into())
            .await
    }

    /// Count entities matching the filter.
    pub async fn count(&self, filter: &Filter) -> AppResult<u64> {
        self.store.count_documents(E::COLLECTION, filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocumentStore;
    use library_core::types::{AuthorId, BookId, GenreId};
    use library_entity::{Book, Genre};
    use serde_json::json;

    fn store() -> Arc<dyn DocumentStore> {
        Arc::new(MemoryDocumentStore::new())
    }

    #[tokio::test]
    async fn test_typed_round_trip_through_store() {
        let genres = Repository::<Genre>::new(store());
        let genre = Genre {
            id: GenreId::new(),
            name: "Poetry".to_string(),
        };
        genres.save(&genre).await.unwrap();

        let found = genres.find_by_id(genre.id).await.unwrap().unwrap();
        assert_eq!(found, genre);
        let by_name = genres
            .find_one(&Filter::all().eq("name", "Poetry"))
            .await
            .unwrap();
        assert_eq!(by_name.map(|g| g.id), Some(genre.id));
    }

    #[tokio::test]
    async fn test_contains_filter_on_typed_ids() {
        let shared = store();
        let books = Repository::<Book>::new(Arc::clone(&shared));
        let genre = GenreId::new();
        let book = Book {
            id: BookId::new(),
            title: "Dune".to_string(),
            author: AuthorId::new(),
            summary: "Spice".to_string(),
            isbn: "9780441013593".to_string(),
            genre: vec![genre],
        };
        books.save(&book).await.unwrap();

        assert_eq!(
            books.count(&Filter::all().contains("genre", genre)).await.unwrap(),
            1
        );
        assert_eq!(
            books
                .count(&Filter::all().contains("genre", GenreId::new()))
                .await
                .unwrap(),
            0
        );

        books.update(book.id, json!({"title": "Dune Messiah"})).await.unwrap();
        let updated = books.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(updated.title, "Dune Messiah");
        assert_eq!(updated.genre, vec![genre]);
    }
}
