//! Extractor configuration turning malformed payloads into domain errors.
//!
//! Actix rejects bodies that are not JSON or do not fit the request DTO
//! before a handler runs. These handlers reshape those rejections into the
//! usual `invalid_request` envelope so clients see one error format.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Detail codes for request payload failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PayloadErrorCode {
    MalformedBody,
    UnsupportedContentType,
    MalformedQuery,
}

impl PayloadErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MalformedBody => "malformed_body",
            Self::UnsupportedContentType => "unsupported_content_type",
            Self::MalformedQuery => "malformed_query",
        }
    }
}

fn payload_error(code: PayloadErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "code": code.as_str() }))
}

pub(crate) fn json_payload_error(err: &JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::ContentType => payload_error(
            PayloadErrorCode::UnsupportedContentType,
            "request body must be application/json",
        ),
        other => payload_error(
            PayloadErrorCode::MalformedBody,
            format!("request body is not valid JSON for this endpoint: {other}"),
        ),
    }
}

pub(crate) fn query_payload_error(err: &QueryPayloadError) -> Error {
    payload_error(
        PayloadErrorCode::MalformedQuery,
        format!("query string could not be parsed: {err}"),
    )
}

/// JSON extractor configuration reporting failures as `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, req: &HttpRequest| {
        debug!(error = %err, path = req.path(), "rejected JSON payload");
        json_payload_error(&err).into()
    })
}

/// Query extractor configuration reporting failures as `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, req: &HttpRequest| {
        debug!(error = %err, path = req.path(), "rejected query string");
        query_payload_error(&err).into()
    })
}
