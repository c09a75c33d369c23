//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed circulation entities (members, titles,
//! loans) with their validation rules, the services implementing the
//! driving ports, and the driven ports adapters implement. Nothing in this
//! module knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - Member, Title, Loan and their `New*` request types.
//! - LoanReportQuery / LoanReport: the paginated report view.
//! - Services: MemberRegistryService, CatalogService, LoanIssuerService,
//!   LoanReportingService.

pub mod error;
pub mod loan;
pub mod member;
pub mod ports;
pub mod report;
pub mod title;
pub mod trace_id;

mod catalog_service;
mod loan_issuer_service;
mod loan_reporting_service;
mod member_registry_service;
mod validation;

pub use self::catalog_service::CatalogService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::loan::{
    Loan, LoanId, LoanListing, LoanRequest, LoanStatus, LoanValidationError, NewLoan, due_date,
};
pub use self::loan_issuer_service::LoanIssuerService;
pub use self::loan_reporting_service::LoanReportingService;
pub use self::member::{
    Email, Member, MemberId, MemberName, MemberStatus, MemberType, MemberValidationError,
    NewMember, RegistrationNumber,
};
pub use self::member_registry_service::MemberRegistryService;
pub use self::report::{LoanReport, LoanReportQuery, LoanReportRow, ReportValidationError};
pub use self::title::{NewTitle, Title, TitleId, TitleStatus, TitleValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::invalid_field;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use circulation::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("member 7 does not exist"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
