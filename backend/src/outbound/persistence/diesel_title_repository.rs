//! PostgreSQL-backed `TitleRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TitleRepository, TitleRepositoryError};
use crate::domain::{NewTitle, Title, TitleStatus};

use super::error_mapping::{StorageFailure, classify_diesel_error, pool_error_message};
use super::models::{NewTitleRow, TitleRow};
use super::pool::{DbPool, PoolError};
use super::schema::titles;

/// Diesel-backed implementation of the title repository port.
#[derive(Clone)]
pub struct DieselTitleRepository {
    pool: DbPool,
}

impl DieselTitleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TitleRepositoryError {
    TitleRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> TitleRepositoryError {
    match classify_diesel_error(error) {
        StorageFailure::Connection(message) => TitleRepositoryError::connection(message),
        StorageFailure::CheckViolation(message) => TitleRepositoryError::constraint(message),
        StorageFailure::UniqueViolation { .. } | StorageFailure::ForeignKeyViolation { .. } => {
            TitleRepositoryError::query("unexpected constraint violation")
        }
        StorageFailure::Query(message) => TitleRepositoryError::query(message),
    }
}

fn row_to_title(row: TitleRow) -> Result<Title, TitleRepositoryError> {
    Title::try_from(row).map_err(TitleRepositoryError::query)
}

#[async_trait]
impl TitleRepository for DieselTitleRepository {
    async fn insert(&self, title: &NewTitle) -> Result<Title, TitleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTitleRow {
            title: title.title(),
            authors: title.authors(),
            isbn: title.isbn(),
            edition: title.edition(),
            year: title.year(),
            total_copies: title.total_copies(),
            available_copies: title.total_copies(),
            status: TitleStatus::Available.as_str(),
        };

        let row: TitleRow = diesel::insert_into(titles::table)
            .values(&new_row)
            .returning(TitleRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_title(row)
    }

    async fn list_newest_first(&self) -> Result<Vec<Title>, TitleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TitleRow> = titles::table
            .select(TitleRow::as_select())
            .order_by(titles::id.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_title).collect()
    }
}
