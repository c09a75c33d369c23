//! Loan activity report: query parameters and privacy-redacted rows.

use std::fmt;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use pagination::{DEFAULT_PAGE_SIZE, Page, PageRequest};

use super::{LoanId, LoanStatus, RegistrationNumber};

/// Validation errors raised while parsing report parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportValidationError {
    /// `start` was not a `YYYY-MM-DD` date.
    InvalidStartDate,
    /// `end` was not a `YYYY-MM-DD` date.
    InvalidEndDate,
    /// `page` was not an integer of at least 1.
    InvalidPage,
}

impl ReportValidationError {
    /// Query parameter the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidStartDate => "start",
            Self::InvalidEndDate => "end",
            Self::InvalidPage => "page",
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidStartDate => "invalid_start_date",
            Self::InvalidEndDate => "invalid_end_date",
            Self::InvalidPage => "invalid_page",
        }
    }
}

impl fmt::Display for ReportValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStartDate => write!(f, "start must be a date formatted YYYY-MM-DD"),
            Self::InvalidEndDate => write!(f, "end must be a date formatted YYYY-MM-DD"),
            Self::InvalidPage => write!(f, "page must be an integer of at least 1"),
        }
    }
}

impl std::error::Error for ReportValidationError {}

fn parse_date(
    raw: Option<&str>,
    err: ReportValidationError,
) -> Result<Option<NaiveDate>, ReportValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| err),
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Filter and page selection for the loan report.
///
/// Both bounds are inclusive on the UTC date of the loan timestamp and
/// independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoanReportQuery {
    /// Earliest loan date to include.
    pub start: Option<NaiveDate>,
    /// Latest loan date to include.
    pub end: Option<NaiveDate>,
    /// Requested page; the page size is fixed at twenty.
    pub page: PageRequest,
}

impl LoanReportQuery {
    /// Parse raw query-string values. Blank dates are treated as absent and
    /// a missing page means the first page.
    ///
    /// # Examples
    /// ```
    /// use circulation::domain::LoanReportQuery;
    ///
    /// let query = LoanReportQuery::try_from_parts(Some("2024-01-01"), None, Some("2"))
    ///     .expect("valid query");
    /// assert_eq!(query.page.page(), 2);
    /// assert!(LoanReportQuery::try_from_parts(None, None, Some("0")).is_err());
    /// ```
    pub fn try_from_parts(
        start: Option<&str>,
        end: Option<&str>,
        page: Option<&str>,
    ) -> Result<Self, ReportValidationError> {
        let start = parse_date(start, ReportValidationError::InvalidStartDate)?;
        let end = parse_date(end, ReportValidationError::InvalidEndDate)?;
        let page = match page.map(str::trim) {
            None | Some("") => PageRequest::first(),
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .and_then(|number| PageRequest::new(number, DEFAULT_PAGE_SIZE).ok())
                .ok_or(ReportValidationError::InvalidPage)?,
        };
        Ok(Self { start, end, page })
    }

    /// Inclusive lower bound on the loan timestamp.
    pub fn loaned_from(&self) -> Option<DateTime<Utc>> {
        self.start.map(start_of_day)
    }

    /// Exclusive upper bound on the loan timestamp: midnight after `end`.
    pub fn loaned_before(&self) -> Option<DateTime<Utc>> {
        self.end.map(|end| {
            end.checked_add_days(Days::new(1))
                .map_or(DateTime::<Utc>::MAX_UTC, start_of_day)
        })
    }

    /// Whether the bounds exclude every possible loan.
    pub fn is_empty_range(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    /// Whether a loan taken at `loaned_at` falls within the bounds.
    pub fn includes(&self, loaned_at: DateTime<Utc>) -> bool {
        let date = loaned_at.date_naive();
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// One report row. Carries the registration number but never the member's
/// name or email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanReportRow {
    /// Loan identifier.
    pub loan_id: LoanId,
    /// Borrowing member's registration number.
    pub registration_number: RegistrationNumber,
    /// Lent title string.
    pub title: String,
    /// UTC date the loan was issued.
    pub loaned_on: NaiveDate,
    /// Date the copy is due back.
    pub due_on: NaiveDate,
    /// Lifecycle state.
    pub status: LoanStatus,
}

/// One page of report rows with its pagination envelope.
pub type LoanReport = Page<LoanReportRow>;

#[cfg(test)]
mod tests {
    //! Coverage for report parameter parsing and date bounds.

    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[rstest]
    #[case(Some("2024-13-01"), None, None, ReportValidationError::InvalidStartDate)]
    #[case(None, Some("yesterday"), None, ReportValidationError::InvalidEndDate)]
    #[case(None, None, Some("0"), ReportValidationError::InvalidPage)]
    #[case(None, None, Some("-1"), ReportValidationError::InvalidPage)]
    #[case(None, None, Some("two"), ReportValidationError::InvalidPage)]
    fn rejects_malformed_parameters(
        #[case] start: Option<&str>,
        #[case] end: Option<&str>,
        #[case] page: Option<&str>,
        #[case] expected: ReportValidationError,
    ) {
        assert_eq!(
            LoanReportQuery::try_from_parts(start, end, page),
            Err(expected)
        );
    }

    #[rstest]
    fn defaults_to_first_page_without_bounds() {
        let query = LoanReportQuery::try_from_parts(Some(""), None, None).expect("valid query");
        assert_eq!(query, LoanReportQuery::default());
        assert_eq!(query.page.per_page(), 20);
    }

    #[rstest]
    fn end_bound_includes_the_whole_day() {
        let query = LoanReportQuery::try_from_parts(Some("2024-05-01"), Some("2024-05-01"), None)
            .expect("valid query");
        let late = Utc
            .with_ymd_and_hms(2024, 5, 1, 23, 59, 59)
            .single()
            .expect("valid timestamp");
        let next = Utc
            .with_ymd_and_hms(2024, 5, 2, 0, 0, 0)
            .single()
            .expect("valid timestamp");

        assert!(query.includes(late));
        assert!(!query.includes(next));
        assert_eq!(query.loaned_from(), Some(start_of_day(date(2024, 5, 1))));
        assert_eq!(query.loaned_before(), Some(next));
    }

    #[rstest]
    fn inverted_bounds_form_an_empty_range() {
        let query = LoanReportQuery::try_from_parts(Some("2024-05-02"), Some("2024-05-01"), None)
            .expect("valid query");
        assert!(query.is_empty_range());
    }
}
