//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain records validate
//! every column so a row that slipped past the storage constraints surfaces
//! as a query error rather than an invalid domain value.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::domain::{
    Email, Loan, LoanId, LoanListing, LoanReportRow, LoanStatus, Member, MemberId, MemberName,
    MemberStatus, MemberType, MemberValidationError, RegistrationNumber, Title, TitleId,
    TitleStatus,
};

use super::schema::{loans, members, titles};

/// Row struct for reading from the members table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MemberRow {
    pub id: i64,
    pub name: String,
    pub registration_number: String,
    pub member_type: String,
    pub email: Option<String>,
    pub registered_on: NaiveDate,
    pub status: String,
}

/// Insertable struct for creating member records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = members)]
pub(crate) struct NewMemberRow<'a> {
    pub name: &'a str,
    pub registration_number: &'a str,
    pub member_type: &'a str,
    pub email: Option<&'a str>,
    pub registered_on: NaiveDate,
    pub status: &'a str,
}

impl TryFrom<MemberRow> for Member {
    type Error = String;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let invalid = |err: MemberValidationError| {
            format!("invalid member row {}: {err}", row.id)
        };
        Ok(Self {
            id: MemberId::new(row.id),
            name: MemberName::new(&row.name).map_err(invalid)?,
            registration_number: RegistrationNumber::new(&row.registration_number)
                .map_err(invalid)?,
            member_type: row.member_type.parse::<MemberType>().map_err(invalid)?,
            email: Email::optional(row.email.as_deref()).map_err(invalid)?,
            registered_on: row.registered_on,
            status: row.status.parse::<MemberStatus>().map_err(invalid)?,
        })
    }
}

/// Row struct for reading from the titles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = titles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TitleRow {
    pub id: i64,
    pub title: String,
    pub authors: String,
    pub isbn: Option<String>,
    pub edition: Option<String>,
    pub year: Option<i32>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub status: String,
}

/// Insertable struct for creating title records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = titles)]
pub(crate) struct NewTitleRow<'a> {
    pub title: &'a str,
    pub authors: &'a str,
    pub isbn: Option<&'a str>,
    pub edition: Option<&'a str>,
    pub year: Option<i32>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub status: &'a str,
}

impl TryFrom<TitleRow> for Title {
    type Error = String;

    fn try_from(row: TitleRow) -> Result<Self, Self::Error> {
        if row.available_copies < 0 || row.available_copies > row.total_copies {
            return Err(format!(
                "invalid title row {}: available copies {} outside 0..={}",
                row.id, row.available_copies, row.total_copies
            ));
        }
        let status = row
            .status
            .parse::<TitleStatus>()
            .map_err(|err| format!("invalid title row {}: {err}", row.id))?;
        Ok(Self {
            id: TitleId::new(row.id),
            title: row.title,
            authors: row.authors,
            isbn: row.isbn,
            edition: row.edition,
            year: row.year,
            total_copies: row.total_copies,
            available_copies: row.available_copies,
            status,
        })
    }
}

/// Row struct for reading from the loans table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = loans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LoanRow {
    pub id: i64,
    pub member_id: i64,
    pub title_id: i64,
    pub loaned_at: DateTime<Utc>,
    pub due_on: NaiveDate,
    pub returned_on: Option<NaiveDate>,
    pub status: String,
    pub fine: f64,
}

/// Insertable struct for creating loan records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = loans)]
pub(crate) struct NewLoanRow<'a> {
    pub member_id: i64,
    pub title_id: i64,
    pub loaned_at: DateTime<Utc>,
    pub due_on: NaiveDate,
    pub status: &'a str,
}

fn parse_loan_status(loan_id: i64, raw: &str) -> Result<LoanStatus, String> {
    raw.parse::<LoanStatus>()
        .map_err(|err| format!("invalid loan row {loan_id}: {err}"))
}

impl TryFrom<LoanRow> for Loan {
    type Error = String;

    fn try_from(row: LoanRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LoanId::new(row.id),
            member_id: MemberId::new(row.member_id),
            title_id: TitleId::new(row.title_id),
            loaned_at: row.loaned_at,
            due_on: row.due_on,
            returned_on: row.returned_on,
            status: parse_loan_status(row.id, &row.status)?,
            fine: row.fine,
        })
    }
}

/// Loan joined with member name and title string.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct LoanListingRow {
    pub loan_id: i64,
    pub member_id: i64,
    pub member_name: String,
    pub title_id: i64,
    pub title: String,
    pub loaned_at: DateTime<Utc>,
    pub due_on: NaiveDate,
    pub status: String,
}

impl TryFrom<LoanListingRow> for LoanListing {
    type Error = String;

    fn try_from(row: LoanListingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            loan_id: LoanId::new(row.loan_id),
            member_id: MemberId::new(row.member_id),
            member_name: MemberName::new(&row.member_name)
                .map_err(|err| format!("invalid loan listing {}: {err}", row.loan_id))?,
            title_id: TitleId::new(row.title_id),
            title: row.title,
            loaned_at: row.loaned_at,
            due_on: row.due_on,
            status: parse_loan_status(row.loan_id, &row.status)?,
        })
    }
}

/// Loan joined with registration number and title string.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct LoanReportRowRecord {
    pub loan_id: i64,
    pub registration_number: String,
    pub title: String,
    pub loaned_at: DateTime<Utc>,
    pub due_on: NaiveDate,
    pub status: String,
}

impl TryFrom<LoanReportRowRecord> for LoanReportRow {
    type Error = String;

    fn try_from(row: LoanReportRowRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            loan_id: LoanId::new(row.loan_id),
            registration_number: RegistrationNumber::new(&row.registration_number)
                .map_err(|err| format!("invalid report row {}: {err}", row.loan_id))?,
            title: row.title,
            loaned_on: row.loaned_at.date_naive(),
            due_on: row.due_on,
            status: parse_loan_status(row.loan_id, &row.status)?,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Row-to-domain conversion coverage.

    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn member_row() -> MemberRow {
        MemberRow {
            id: 3,
            name: "Ana".to_owned(),
            registration_number: "88888".to_owned(),
            member_type: "STUDENT".to_owned(),
            email: None,
            registered_on: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            status: "ACTIVE".to_owned(),
        }
    }

    #[rstest]
    fn member_row_converts() {
        let member = Member::try_from(member_row()).expect("valid row");
        assert_eq!(member.registration_number.as_ref(), "88888");
        assert_eq!(member.member_type, MemberType::Student);
    }

    #[rstest]
    fn member_row_with_unknown_type_is_rejected() {
        let row = MemberRow {
            member_type: "ALUNO".to_owned(),
            ..member_row()
        };
        let err = Member::try_from(row).expect_err("unknown type");
        assert!(err.contains("member row 3"));
    }

    #[rstest]
    fn title_row_with_excess_availability_is_rejected() {
        let row = TitleRow {
            id: 1,
            title: "T".to_owned(),
            authors: "A".to_owned(),
            isbn: None,
            edition: None,
            year: None,
            total_copies: 1,
            available_copies: 2,
            status: "AVAILABLE".to_owned(),
        };
        assert!(Title::try_from(row).is_err());
    }

    #[rstest]
    fn report_record_uses_utc_date() {
        let record = LoanReportRowRecord {
            loan_id: 5,
            registration_number: "12345".to_owned(),
            title: "T".to_owned(),
            loaned_at: Utc
                .with_ymd_and_hms(2024, 3, 9, 23, 59, 59)
                .single()
                .expect("valid timestamp"),
            due_on: NaiveDate::from_ymd_opt(2024, 3, 23).expect("valid date"),
            status: "ACTIVE".to_owned(),
        };
        let row = LoanReportRow::try_from(record).expect("valid record");
        assert_eq!(
            row.loaned_on,
            NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
        );
    }
}
