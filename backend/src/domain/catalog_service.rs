//! Title catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{Catalog, TitleRepository, TitleRepositoryError};
use crate::domain::{Error, NewTitle, Title};

/// Catalogue backed by a title repository.
#[derive(Clone)]
pub struct CatalogService<R> {
    repo: Arc<R>,
}

impl<R> CatalogService<R> {
    /// Create a new service over `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_title_error(error: TitleRepositoryError) -> Error {
    match error {
        TitleRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("title repository unavailable: {message}"))
        }
        TitleRepositoryError::Query { message } => {
            Error::internal(format!("title repository error: {message}"))
        }
        TitleRepositoryError::Constraint { message } => Error::invalid_request(message),
    }
}

#[async_trait]
impl<R> Catalog for CatalogService<R>
where
    R: TitleRepository,
{
    async fn register(&self, title: NewTitle) -> Result<Title, Error> {
        let stored = self.repo.insert(&title).await.map_err(map_title_error)?;
        info!(
            title_id = %stored.id,
            total_copies = stored.total_copies,
            "title registered"
        );
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Title>, Error> {
        self.repo.list_newest_first().await.map_err(map_title_error)
    }
}
