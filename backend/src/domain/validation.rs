//! Conversions from field validation failures into domain errors.
//!
//! Every validation error becomes `invalid_request` with
//! `details: { field, code }` so clients can point at the offending input.

use serde_json::json;

use super::{
    Error, LoanValidationError, MemberValidationError, ReportValidationError,
    TitleValidationError,
};

/// Build an `invalid_request` error naming the offending field.
///
/// # Examples
/// ```
/// use circulation::domain::{ErrorCode, invalid_field};
///
/// let err = invalid_field("page", "invalid_page", "page must be at least 1");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// let field = err.details().and_then(|d| d.get("field")).and_then(|v| v.as_str());
/// assert_eq!(field, Some("page"));
/// ```
pub fn invalid_field(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

impl From<MemberValidationError> for Error {
    fn from(err: MemberValidationError) -> Self {
        invalid_field(err.field(), err.code(), err.to_string())
    }
}

impl From<TitleValidationError> for Error {
    fn from(err: TitleValidationError) -> Self {
        invalid_field(err.field(), err.code(), err.to_string())
    }
}

impl From<LoanValidationError> for Error {
    fn from(err: LoanValidationError) -> Self {
        invalid_field(err.field(), err.code(), err.to_string())
    }
}

impl From<ReportValidationError> for Error {
    fn from(err: ReportValidationError) -> Self {
        invalid_field(err.field(), err.code(), err.to_string())
    }
}
