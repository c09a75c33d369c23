//! Shared Diesel error classification for the circulation repositories.
//!
//! Repositories first classify a Diesel failure into a [`StorageFailure`],
//! then translate it into their own port error. Constraint names come from
//! the migrations and identify which uniqueness or reference rule fired.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Unique constraint on `members.registration_number`.
pub(crate) const MEMBERS_REGISTRATION_NUMBER_KEY: &str = "members_registration_number_key";
/// Unique constraint on `members.email`.
pub(crate) const MEMBERS_EMAIL_KEY: &str = "members_email_key";
/// Foreign key from `loans.member_id` to `members.id`.
pub(crate) const LOANS_MEMBER_ID_FKEY: &str = "loans_member_id_fkey";
/// Foreign key from `loans.title_id` to `titles.id`.
pub(crate) const LOANS_TITLE_ID_FKEY: &str = "loans_title_id_fkey";

/// Storage failure categories the repositories care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StorageFailure {
    /// The connection was lost or could not be obtained.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation { constraint: Option<String> },
    /// A check or not-null constraint rejected the write.
    CheckViolation(String),
    /// Anything else.
    Query(String),
}

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error, logging the underlying details at debug level.
pub(crate) fn classify_diesel_error(error: DieselError) -> StorageFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StorageFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => {
            StorageFailure::Query("database query error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StorageFailure::Connection("database connection error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StorageFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            StorageFailure::ForeignKeyViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation,
            info,
        ) => StorageFailure::CheckViolation(info.message().to_owned()),
        _ => StorageFailure::Query("database error".to_owned()),
    }
}
