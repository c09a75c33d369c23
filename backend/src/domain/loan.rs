//! Loan data model and the due-date policy.
//!
//! Loans are created in the `ACTIVE` state and never transition. The
//! `returned_on` and `fine` fields exist for storage compatibility only.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{MemberId, MemberName, MemberType, MemberValidationError, TitleId};

/// Validation errors raised while building a loan request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanValidationError {
    /// Member identifier was not a positive integer.
    InvalidMemberId,
    /// Title identifier was not a positive integer.
    InvalidTitleId,
    /// Member type was not one of the recognised values.
    InvalidMemberType,
    /// Supplied member type differs from the stored one.
    MemberTypeMismatch {
        /// Type recorded for the member.
        stored: MemberType,
        /// Type supplied by the caller.
        supplied: MemberType,
    },
    /// Loan status was not one of the recognised values.
    InvalidStatus,
}

impl LoanValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidMemberId => "memberId",
            Self::InvalidTitleId => "bookId",
            Self::InvalidMemberType | Self::MemberTypeMismatch { .. } => "memberType",
            Self::InvalidStatus => "status",
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidMemberId => "invalid_member_id",
            Self::InvalidTitleId => "invalid_book_id",
            Self::InvalidMemberType => "invalid_member_type",
            Self::MemberTypeMismatch { .. } => "member_type_mismatch",
            Self::InvalidStatus => "invalid_loan_status",
        }
    }
}

impl fmt::Display for LoanValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMemberId => write!(f, "memberId must be a positive integer"),
            Self::InvalidTitleId => write!(f, "bookId must be a positive integer"),
            Self::InvalidMemberType => {
                write!(f, "member type must be one of STUDENT, TEACHER, STAFF")
            }
            Self::MemberTypeMismatch { stored, supplied } => write!(
                f,
                "member type {supplied} does not match the registered type {stored}"
            ),
            Self::InvalidStatus => {
                write!(f, "loan status must be one of ACTIVE, RETURNED, OVERDUE, CANCEL")
            }
        }
    }
}

impl std::error::Error for LoanValidationError {}

impl From<MemberValidationError> for LoanValidationError {
    fn from(_: MemberValidationError) -> Self {
        Self::InvalidMemberType
    }
}

/// Surrogate key assigned by storage when a loan is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanId(i64);

impl LoanId {
    /// Wrap a raw storage identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw storage identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Loan lifecycle state. Only `Active` is ever written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    /// Copy is out with the member.
    #[default]
    Active,
    /// Copy came back.
    Returned,
    /// Due date passed without a return.
    Overdue,
    /// Loan was cancelled.
    Cancel,
}

impl LoanStatus {
    /// Stored and serialised representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Returned => "RETURNED",
            Self::Overdue => "OVERDUE",
            Self::Cancel => "CANCEL",
        }
    }
}

impl FromStr for LoanStatus {
    type Err = LoanValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "RETURNED" => Ok(Self::Returned),
            "OVERDUE" => Ok(Self::Overdue),
            "CANCEL" => Ok(Self::Cancel),
            _ => Err(LoanValidationError::InvalidStatus),
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the due date for a loan taken at `loaned_at`.
///
/// The period is counted from the UTC calendar date of the loan: 14 days
/// for students, 30 for everyone else.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use circulation::domain::{due_date, MemberType};
///
/// let loaned_at = Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 0).single().expect("valid");
/// assert_eq!(
///     due_date(loaned_at, MemberType::Student),
///     NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid"),
/// );
/// ```
pub fn due_date(loaned_at: DateTime<Utc>, member_type: MemberType) -> NaiveDate {
    loaned_at
        .date_naive()
        .checked_add_days(Days::new(member_type.loan_period_days()))
        .unwrap_or(NaiveDate::MAX)
}

/// Validated caller request to issue a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanRequest {
    /// Borrowing member.
    pub member_id: MemberId,
    /// Title to lend.
    pub title_id: TitleId,
    /// Member type as supplied by the caller.
    pub member_type: MemberType,
}

impl LoanRequest {
    /// Validate raw request values.
    pub fn try_from_parts(
        member_id: i64,
        title_id: i64,
        member_type: &str,
    ) -> Result<Self, LoanValidationError> {
        if member_id <= 0 {
            return Err(LoanValidationError::InvalidMemberId);
        }
        if title_id <= 0 {
            return Err(LoanValidationError::InvalidTitleId);
        }
        Ok(Self {
            member_id: MemberId::new(member_id),
            title_id: TitleId::new(title_id),
            member_type: member_type.parse()?,
        })
    }

    /// Check the supplied type against the member's stored type.
    pub fn confirm_member_type(&self, stored: MemberType) -> Result<(), LoanValidationError> {
        if self.member_type == stored {
            Ok(())
        } else {
            Err(LoanValidationError::MemberTypeMismatch {
                stored,
                supplied: self.member_type,
            })
        }
    }
}

/// Loan ready to be persisted, with its dates already computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewLoan {
    /// Borrowing member.
    pub member_id: MemberId,
    /// Title to lend.
    pub title_id: TitleId,
    /// Moment the loan was issued.
    pub loaned_at: DateTime<Utc>,
    /// Date the copy is due back.
    pub due_on: NaiveDate,
}

impl NewLoan {
    /// Build a loan for `member_type` issued at `loaned_at`.
    pub fn issue(
        member_id: MemberId,
        title_id: TitleId,
        member_type: MemberType,
        loaned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            member_id,
            title_id,
            loaned_at,
            due_on: due_date(loaned_at, member_type),
        }
    }
}

/// Persisted loan record.
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    /// Storage-assigned identifier.
    pub id: LoanId,
    /// Borrowing member.
    pub member_id: MemberId,
    /// Lent title.
    pub title_id: TitleId,
    /// Moment the loan was issued.
    pub loaned_at: DateTime<Utc>,
    /// Date the copy is due back.
    pub due_on: NaiveDate,
    /// Date the copy came back; never populated.
    pub returned_on: Option<NaiveDate>,
    /// Lifecycle state.
    pub status: LoanStatus,
    /// Fine owed; never computed.
    pub fine: f64,
}

impl Loan {
    /// Assemble a freshly created `ACTIVE` record.
    pub fn from_new(id: LoanId, new: NewLoan) -> Self {
        Self {
            id,
            member_id: new.member_id,
            title_id: new.title_id,
            loaned_at: new.loaned_at,
            due_on: new.due_on,
            returned_on: None,
            status: LoanStatus::Active,
            fine: 0.0,
        }
    }
}

/// Loan joined with member name and title string for the loans listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanListing {
    /// Loan identifier.
    pub loan_id: LoanId,
    /// Borrowing member.
    pub member_id: MemberId,
    /// Borrowing member's name.
    pub member_name: MemberName,
    /// Lent title.
    pub title_id: TitleId,
    /// Lent title string.
    pub title: String,
    /// Moment the loan was issued.
    pub loaned_at: DateTime<Utc>,
    /// Date the copy is due back.
    pub due_on: NaiveDate,
    /// Lifecycle state.
    pub status: LoanStatus,
}
