//! Driving port for the title catalogue.

use async_trait::async_trait;

use crate::domain::{Error, NewTitle, Title};

/// Domain use-case port for registering and listing titles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Register a title with every copy available.
    async fn register(&self, title: NewTitle) -> Result<Title, Error>;

    /// Every title, newest first.
    async fn list(&self) -> Result<Vec<Title>, Error>;
}
