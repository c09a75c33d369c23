//! PostgreSQL-backed `MemberRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MemberRepository, MemberRepositoryError};
use crate::domain::{Member, MemberId, MemberStatus, NewMember};

use super::error_mapping::{
    MEMBERS_EMAIL_KEY, MEMBERS_REGISTRATION_NUMBER_KEY, StorageFailure, classify_diesel_error,
    pool_error_message,
};
use super::models::{MemberRow, NewMemberRow};
use super::pool::{DbPool, PoolError};
use super::schema::members;

/// Diesel-backed implementation of the member repository port.
#[derive(Clone)]
pub struct DieselMemberRepository {
    pool: DbPool,
}

impl DieselMemberRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MemberRepositoryError {
    MemberRepositoryError::connection(pool_error_message(error))
}

fn map_failure(failure: StorageFailure) -> MemberRepositoryError {
    match failure {
        StorageFailure::Connection(message) => MemberRepositoryError::connection(message),
        StorageFailure::CheckViolation(message) => MemberRepositoryError::constraint(message),
        StorageFailure::UniqueViolation { constraint } => MemberRepositoryError::query(format!(
            "unexpected unique violation on {}",
            constraint.as_deref().unwrap_or("unknown constraint")
        )),
        StorageFailure::ForeignKeyViolation { .. } => {
            MemberRepositoryError::query("unexpected foreign key violation")
        }
        StorageFailure::Query(message) => MemberRepositoryError::query(message),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> MemberRepositoryError {
    map_failure(classify_diesel_error(error))
}

/// Map insert failures, naming the duplicated value for unique violations.
fn map_insert_error(error: diesel::result::Error, member: &NewMember) -> MemberRepositoryError {
    match classify_diesel_error(error) {
        StorageFailure::UniqueViolation { constraint }
            if constraint.as_deref() == Some(MEMBERS_REGISTRATION_NUMBER_KEY) =>
        {
            MemberRepositoryError::duplicate_registration_number(
                member.registration_number.as_ref(),
            )
        }
        StorageFailure::UniqueViolation { constraint }
            if constraint.as_deref() == Some(MEMBERS_EMAIL_KEY) =>
        {
            let email = member.email.as_ref().map_or("", AsRef::as_ref);
            MemberRepositoryError::duplicate_email(email)
        }
        other => map_failure(other),
    }
}

fn row_to_member(row: MemberRow) -> Result<Member, MemberRepositoryError> {
    Member::try_from(row).map_err(MemberRepositoryError::query)
}

#[async_trait]
impl MemberRepository for DieselMemberRepository {
    async fn insert(
        &self,
        member: &NewMember,
        registered_on: NaiveDate,
    ) -> Result<Member, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewMemberRow {
            name: member.name.as_ref(),
            registration_number: member.registration_number.as_ref(),
            member_type: member.member_type.as_str(),
            email: member.email.as_ref().map(AsRef::as_ref),
            registered_on,
            status: MemberStatus::Active.as_str(),
        };

        let row: MemberRow = diesel::insert_into(members::table)
            .values(&new_row)
            .returning(MemberRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, member))?;

        row_to_member(row)
    }

    async fn list_newest_first(&self) -> Result<Vec<Member>, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MemberRow> = members::table
            .select(MemberRow::as_select())
            .order_by(members::id.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_member).collect()
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<MemberRow> = members::table
            .filter(members::id.eq(id.get()))
            .select(MemberRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_member).transpose()
    }
}
