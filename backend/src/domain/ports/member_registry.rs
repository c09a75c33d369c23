//! Driving port for member registration.

use async_trait::async_trait;

use crate::domain::{Error, Member, NewMember};

/// Domain use-case port for registering and listing members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRegistry: Send + Sync {
    /// Register a member dated today and return the stored record.
    async fn register(&self, member: NewMember) -> Result<Member, Error>;

    /// Every member, newest first.
    async fn list(&self) -> Result<Vec<Member>, Error>;
}
