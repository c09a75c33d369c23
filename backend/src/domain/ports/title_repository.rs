//! Port abstraction for title persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewTitle, Title};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by title repository adapters.
    pub enum TitleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "title repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "title repository query failed: {message}",
        /// A storage-level check constraint rejected the record.
        Constraint { message: String } => "title rejected by storage: {message}",
    }
}

/// Port for title storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TitleRepository: Send + Sync {
    /// Insert a title with every copy available and return the stored record.
    async fn insert(&self, title: &NewTitle) -> Result<Title, TitleRepositoryError>;

    /// Every title, highest identifier first.
    async fn list_newest_first(&self) -> Result<Vec<Title>, TitleRepositoryError>;
}
