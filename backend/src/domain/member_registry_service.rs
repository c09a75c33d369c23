//! Member registration service.
//!
//! Implements [`MemberRegistry`] over a [`MemberRepository`]. Registration
//! dates come from the injected clock so tests can pin "today".

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{MemberRegistry, MemberRepository, MemberRepositoryError};
use crate::domain::{Error, Member, NewMember};

/// Member registry backed by a member repository.
#[derive(Clone)]
pub struct MemberRegistryService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> MemberRegistryService<R> {
    /// Create a new service over `repo`, dating registrations with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

pub(crate) fn map_member_error(error: MemberRepositoryError) -> Error {
    match error {
        MemberRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("member repository unavailable: {message}"))
        }
        MemberRepositoryError::Query { message } => {
            Error::internal(format!("member repository error: {message}"))
        }
        err @ MemberRepositoryError::DuplicateRegistrationNumber { .. } => {
            Error::conflict(err.to_string()).with_details(json!({
                "field": "registrationNumber",
                "code": "duplicate_registration_number",
            }))
        }
        err @ MemberRepositoryError::DuplicateEmail { .. } => Error::conflict(err.to_string())
            .with_details(json!({
                "field": "email",
                "code": "duplicate_email",
            })),
        MemberRepositoryError::Constraint { message } => Error::invalid_request(message),
    }
}

#[async_trait]
impl<R> MemberRegistry for MemberRegistryService<R>
where
    R: MemberRepository,
{
    async fn register(&self, member: NewMember) -> Result<Member, Error> {
        let registered_on = self.clock.utc().date_naive();
        let stored = self
            .repo
            .insert(&member, registered_on)
            .await
            .map_err(map_member_error)?;
        info!(
            member_id = %stored.id,
            registration_number = %stored.registration_number,
            member_type = %stored.member_type,
            "member registered"
        );
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Member>, Error> {
        self.repo
            .list_newest_first()
            .await
            .map_err(map_member_error)
    }
}

#[cfg(test)]
#[path = "member_registry_service_tests.rs"]
mod tests;
