//! Tests for the domain error payload and its trace propagation.

use super::*;
use crate::domain::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("duplicate"), ErrorCode::Conflict)]
#[case(Error::item_unavailable(), ErrorCode::ItemUnavailable)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] err: Error, #[case] expected: ErrorCode) {
    assert_eq!(err.code(), expected);
}

#[rstest]
fn item_unavailable_uses_fixed_message() {
    assert_eq!(Error::item_unavailable().message(), "item unavailable");
}

#[rstest]
fn new_substitutes_blank_messages() {
    let err = Error::new(ErrorCode::Conflict, "  ");
    assert_eq!(err.message(), "conflict");
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        Error::try_new(ErrorCode::InternalError, "boom")
            .expect("validation accepts non-empty message")
    })
    .await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_camel_case_envelope(expected_trace_id: String) {
    let err = Error::invalid_request("bad")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "name", "code": "empty_name"}));
    let value = serde_json::to_value(&err).expect("serialise error");

    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["message"], "bad");
    assert_eq!(value["traceId"], expected_trace_id);
    assert_eq!(value["details"]["field"], "name");
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::item_unavailable()).expect("serialise error");
    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());
    assert_eq!(value["code"], "item_unavailable");
}
