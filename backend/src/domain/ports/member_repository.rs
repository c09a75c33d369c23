//! Port abstraction for member persistence adapters and their errors.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Member, MemberId, NewMember};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by member repository adapters.
    pub enum MemberRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "member repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "member repository query failed: {message}",
        /// Another member already holds the registration number.
        DuplicateRegistrationNumber { registration_number: String } =>
            "registration number {registration_number} is already registered",
        /// Another member already holds the email address.
        DuplicateEmail { email: String } => "email {email} is already registered",
        /// A storage-level check constraint rejected the record.
        Constraint { message: String } => "member rejected by storage: {message}",
    }
}

/// Port for member storage and retrieval.
///
/// Registration number and email uniqueness are enforced by the adapter;
/// callers rely on [`MemberRepositoryError::DuplicateRegistrationNumber`]
/// and [`MemberRepositoryError::DuplicateEmail`] rather than checking first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a member with `ACTIVE` status and return the stored record.
    async fn insert(
        &self,
        member: &NewMember,
        registered_on: NaiveDate,
    ) -> Result<Member, MemberRepositoryError>;

    /// Every member, highest identifier first.
    async fn list_newest_first(&self) -> Result<Vec<Member>, MemberRepositoryError>;

    /// Fetch a member by identifier.
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, MemberRepositoryError>;
}
