//! PostgreSQL-backed `LoanRepository` implementation using Diesel ORM.
//!
//! Issuing a loan runs in one transaction: a conditional decrement of
//! `titles.available_copies` (which row-locks the title) followed by the
//! loan insert. A decrement touching no rows means the title is missing or
//! exhausted, and nothing is written.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::Page;

use crate::domain::ports::{LoanRepository, LoanRepositoryError};
use crate::domain::{
    Loan, LoanListing, LoanReport, LoanReportQuery, LoanReportRow, LoanStatus, NewLoan,
};

use super::error_mapping::{
    LOANS_MEMBER_ID_FKEY, LOANS_TITLE_ID_FKEY, StorageFailure, classify_diesel_error,
    pool_error_message,
};
use super::models::{LoanListingRow, LoanReportRowRecord, LoanRow, NewLoanRow};
use super::pool::{DbPool, PoolError};
use super::schema::{loans, members, titles};

/// Diesel-backed implementation of the loan repository port.
#[derive(Clone)]
pub struct DieselLoanRepository {
    pool: DbPool,
}

impl DieselLoanRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LoanRepositoryError {
    LoanRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, loan: Option<&NewLoan>) -> LoanRepositoryError {
    match (classify_diesel_error(error), loan) {
        (StorageFailure::ForeignKeyViolation { constraint }, Some(loan))
            if constraint.as_deref() == Some(LOANS_MEMBER_ID_FKEY) =>
        {
            LoanRepositoryError::unknown_member(loan.member_id.get())
        }
        (StorageFailure::ForeignKeyViolation { constraint }, Some(loan))
            if constraint.as_deref() == Some(LOANS_TITLE_ID_FKEY) =>
        {
            LoanRepositoryError::unavailable(loan.title_id.get())
        }
        (StorageFailure::Connection(message), _) => LoanRepositoryError::connection(message),
        (StorageFailure::CheckViolation(message), _) => LoanRepositoryError::constraint(message),
        (StorageFailure::UniqueViolation { .. } | StorageFailure::ForeignKeyViolation { .. }, _) => {
            LoanRepositoryError::query("unexpected constraint violation")
        }
        (StorageFailure::Query(message), _) => LoanRepositoryError::query(message),
    }
}

fn map_query_error(error: diesel::result::Error) -> LoanRepositoryError {
    map_diesel_error(error, None)
}

fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl LoanRepository for DieselLoanRepository {
    async fn issue(&self, loan: &NewLoan) -> Result<Loan, LoanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewLoanRow {
            member_id: loan.member_id.get(),
            title_id: loan.title_id.get(),
            loaned_at: loan.loaned_at,
            due_on: loan.due_on,
            status: LoanStatus::Active.as_str(),
        };
        let title_id = loan.title_id.get();

        let inserted: Option<LoanRow> = conn
            .transaction(|conn| {
                async move {
                    let taken = diesel::update(
                        titles::table
                            .filter(titles::id.eq(title_id))
                            .filter(titles::available_copies.gt(0)),
                    )
                    .set(titles::available_copies.eq(titles::available_copies - 1))
                    .execute(conn)
                    .await?;

                    if taken == 0 {
                        return Ok(None);
                    }

                    let row: LoanRow = diesel::insert_into(loans::table)
                        .values(&new_row)
                        .returning(LoanRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(Some(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, Some(loan)))?;

        let row = inserted.ok_or_else(|| LoanRepositoryError::unavailable(title_id))?;
        Loan::try_from(row).map_err(LoanRepositoryError::query)
    }

    async fn list_newest_first(&self) -> Result<Vec<LoanListing>, LoanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<LoanListingRow> = loans::table
            .inner_join(members::table)
            .inner_join(titles::table)
            .select((
                loans::id,
                loans::member_id,
                members::name,
                loans::title_id,
                titles::title,
                loans::loaned_at,
                loans::due_on,
                loans::status,
            ))
            .order_by(loans::id.desc())
            .load(&mut conn)
            .await
            .map_err(map_query_error)?;

        rows.into_iter()
            .map(|row| LoanListing::try_from(row).map_err(LoanRepositoryError::query))
            .collect()
    }

    async fn report(&self, query: &LoanReportQuery) -> Result<LoanReport, LoanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let loaned_from = query.loaned_from();
        let loaned_before = query.loaned_before();
        let limit = to_sql_bound(query.page.limit());
        let offset = to_sql_bound(query.page.offset());

        // Count and page inside one transaction so both observe the same snapshot.
        let (total, records): (i64, Vec<LoanReportRowRecord>) = conn
            .transaction(|conn| {
                async move {
                    let mut count_query = loans::table.count().into_boxed();
                    if let Some(from) = loaned_from {
                        count_query = count_query.filter(loans::loaned_at.ge(from));
                    }
                    if let Some(before) = loaned_before {
                        count_query = count_query.filter(loans::loaned_at.lt(before));
                    }
                    let total: i64 = count_query.get_result(conn).await?;

                    let mut rows_query = loans::table
                        .inner_join(members::table)
                        .inner_join(titles::table)
                        .select((
                            loans::id,
                            members::registration_number,
                            titles::title,
                            loans::loaned_at,
                            loans::due_on,
                            loans::status,
                        ))
                        .order_by((loans::loaned_at.desc(), loans::id.desc()))
                        .limit(limit)
                        .offset(offset)
                        .into_boxed();
                    if let Some(from) = loaned_from {
                        rows_query = rows_query.filter(loans::loaned_at.ge(from));
                    }
                    if let Some(before) = loaned_before {
                        rows_query = rows_query.filter(loans::loaned_at.lt(before));
                    }
                    let records: Vec<LoanReportRowRecord> = rows_query.load(conn).await?;

                    Ok((total, records))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_query_error)?;

        let rows = records
            .into_iter()
            .map(|record| LoanReportRow::try_from(record).map_err(LoanRepositoryError::query))
            .collect::<Result<Vec<_>, _>>()?;
        let total = u64::try_from(total).unwrap_or_default();
        Ok(Page::new(rows, query.page, total))
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage for the loan adapter.

    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};
    use rstest::rstest;

    use crate::domain::{MemberId, TitleId};

    struct ConstraintInfo(&'static str);

    impl DatabaseErrorInformation for ConstraintInfo {
        fn message(&self) -> &str {
            "violates foreign key constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("loans")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn loan() -> NewLoan {
        NewLoan {
            member_id: MemberId::new(7),
            title_id: TitleId::new(9),
            loaned_at: Utc
                .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
            due_on: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
        }
    }

    fn fk_error(constraint: &'static str) -> diesel::result::Error {
        diesel::result::Error::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new(ConstraintInfo(constraint)),
        )
    }

    #[rstest]
    fn member_fk_violation_is_unknown_member() {
        let err = map_diesel_error(fk_error(LOANS_MEMBER_ID_FKEY), Some(&loan()));
        assert_eq!(err, LoanRepositoryError::unknown_member(7_i64));
    }

    #[rstest]
    fn title_fk_violation_is_unavailable() {
        let err = map_diesel_error(fk_error(LOANS_TITLE_ID_FKEY), Some(&loan()));
        assert_eq!(err, LoanRepositoryError::unavailable(9_i64));
    }

    #[rstest]
    fn fk_violation_outside_issue_is_query_error() {
        let err = map_query_error(fk_error(LOANS_MEMBER_ID_FKEY));
        assert!(matches!(err, LoanRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(40, 40)]
    #[case(u64::MAX, i64::MAX)]
    fn sql_bounds_saturate(#[case] value: u64, #[case] expected: i64) {
        assert_eq!(to_sql_bound(value), expected);
    }
}
