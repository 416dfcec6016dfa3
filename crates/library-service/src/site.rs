//! Home page statistics.

use serde::Serialize;

use library_core::result::AppResult;
use library_core::types::Filter;
use library_entity::BookInstanceStatus;

use crate::catalog::CatalogRepositories;

/// One labelled count on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Count {
    pub name: &'static str,
    pub value: u64,
}

/// Site-wide read-only queries.
#[derive(Debug, Clone)]
pub struct SiteService {
    repos: CatalogRepositories,
}

impl SiteService {
    /// Creates a new site service.
    pub fn new(repos: CatalogRepositories) -> Self {
        Self { repos }
    }

    /// Catalog totals, counted concurrently.
    pub async fn counts(&self) -> AppResult<Vec<Count>> {
        let all = Filter::all();
        let available = Filter::all().eq("status", BookInstanceStatus::Available);
        let (books, copies, copies_available, authors, genres) = futures::try_join!(
            self.repos.books.count(&all),
            self.repos.instances.count(&all),
            self.repos.instances.count(&available),
            self.repos.authors.count(&all),
            self.repos.genres.count(&all),
        )?;
        Ok(vec![
            Count { name: "Books", value: books },
            Count { name: "Copies", value: copies },
            Count { name: "Copies Available", value: copies_available },
            Count { name: "Authors", value: authors },
            Count { name: "Genres", value: genres },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::repos;
    use library_core::types::{BookId, BookInstanceId, GenreId};
    use library_entity::{BookInstance, Genre};

    #[tokio::test]
    async fn test_counts() {
        let repos = repos();
        repos
            .genres
            .save(&Genre {
                id: GenreId::new(),
                name: "Drama".to_string(),
            })
            .await
            .unwrap();
        for status in [BookInstanceStatus::Available, BookInstanceStatus::Loaned] {
            repos
                .instances
                .save(&BookInstance {
                    id: BookInstanceId::new(),
                    book: BookId::new(),
                    imprint: "x".to_string(),
                    status,
                    due_back: None,
                })
                .await
                .unwrap();
        }

        let counts = SiteService::new(repos).counts().await.unwrap();
        let values: Vec<_> = counts.iter().map(|c| (c.name, c.value)).collect();
        assert_eq!(
            values,
            [
                ("Books", 0),
                ("Copies", 2),
                ("Copies Available", 1),
                ("Authors", 0),
                ("Genres", 1)
            ]
        );
    }
}
