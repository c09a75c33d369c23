//! Tests for the loan report handler.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::TimeDelta;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockCatalog, MockLoanIssuer, MockLoanReporting, MockMemberRegistry};
use crate::inbound::http::test_utils::{error_parts, fixed_clock, test_app};
use crate::test_support::{FixedClock, in_memory_http_state};

async fn post_json<S>(app: &S, uri: &str, body: Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK, "POST {uri} failed");
}

/// Register member 88888 and a title with `copies` copies, then issue
/// `loans` loans one hour apart.
async fn seed_loans<S>(app: &S, clock: &FixedClock, copies: i64, loans: usize)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    post_json(
        app,
        "/api/v1/members",
        json!({
            "name": "Ana Souza",
            "registrationNumber": "88888",
            "memberType": "STUDENT",
            "email": "ana@example.org",
        }),
    )
    .await;
    post_json(
        app,
        "/api/v1/titles",
        json!({"title": "Iracema", "authors": "José de Alencar", "totalCopies": copies}),
    )
    .await;
    for _ in 0..loans {
        post_json(
            app,
            "/api/v1/loans",
            json!({"memberId": 1, "bookId": 1, "memberType": "STUDENT"}),
        )
        .await;
        clock.advance(TimeDelta::hours(1));
    }
}

async fn get_report<S>(app: &S, query: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/reports/loans{query}"))
        .to_request();
    actix_test::call_service(app, request).await
}

#[rstest]
#[actix_web::test]
async fn twenty_five_loans_span_two_pages() {
    let clock = fixed_clock();
    let (state, _store) = in_memory_http_state(Arc::clone(&clock));
    let app = actix_test::init_service(test_app(state)).await;
    seed_loans(&app, &clock, 30, 25).await;

    let first: Value = actix_test::read_body_json(get_report(&app, "").await).await;
    assert_eq!(
        first.get("pagination"),
        Some(&json!({"page": 1, "per_page": 20, "total": 25, "total_pages": 2}))
    );
    let rows = first
        .get("data")
        .and_then(Value::as_array)
        .expect("data array");
    assert_eq!(rows.len(), 20);
    assert_eq!(rows.first().and_then(|r| r.get("loanId")), Some(&json!(25)));
    for row in rows {
        assert_eq!(row.get("matricula"), Some(&json!("88888")));
        assert!(row.get("email").is_none());
        assert!(row.get("memberName").is_none());
    }

    let second: LoanReportResponse =
        actix_test::read_body_json(get_report(&app, "?page=2").await).await;
    assert_eq!(second.data.len(), 5);
    assert_eq!(second.pagination.page, 2);
}

#[rstest]
#[case("?start=2024-05-02", 1)]
#[case("?end=2024-05-01", 2)]
#[case("?start=2024-05-01&end=2024-05-02", 3)]
#[case("?start=2024-05-03&end=2024-05-01", 0)]
#[case("?start=&end=", 3)]
#[actix_web::test]
async fn date_bounds_are_inclusive(#[case] query: &str, #[case] expected: u64) {
    let clock = fixed_clock();
    let (state, _store) = in_memory_http_state(Arc::clone(&clock));
    let app = actix_test::init_service(test_app(state)).await;
    // 09:00 and 10:00 on 1 May, then 10:00 on 2 May.
    seed_loans(&app, &clock, 3, 2).await;
    clock.advance(TimeDelta::hours(23));
    post_json(
        &app,
        "/api/v1/loans",
        json!({"memberId": 1, "bookId": 1, "memberType": "STUDENT"}),
    )
    .await;

    let report: LoanReportResponse =
        actix_test::read_body_json(get_report(&app, query).await).await;
    assert_eq!(report.pagination.total, expected);
    assert_eq!(report.pagination.total_pages, expected.div_ceil(20));
}

#[rstest]
#[case("?page=0", "page", "invalid_page")]
#[case("?page=abc", "page", "invalid_page")]
#[case("?start=01/05/2024", "start", "invalid_start_date")]
#[case("?end=2024-02-30", "end", "invalid_end_date")]
#[actix_web::test]
async fn malformed_parameters_are_rejected(
    #[case] query: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let state = HttpState::new(
        Arc::new(MockMemberRegistry::new()),
        Arc::new(MockCatalog::new()),
        Arc::new(MockLoanIssuer::new()),
        Arc::new(MockLoanReporting::new()),
    );
    let app = actix_test::init_service(test_app(state)).await;

    let response = get_report(&app, query).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        error_parts(&body),
        (Some("invalid_request"), Some(field), Some(code))
    );
}

#[rstest]
#[actix_web::test]
async fn pages_past_the_end_are_empty() {
    let clock = fixed_clock();
    let (state, _store) = in_memory_http_state(Arc::clone(&clock));
    let app = actix_test::init_service(test_app(state)).await;
    seed_loans(&app, &clock, 1, 1).await;

    let report: LoanReportResponse =
        actix_test::read_body_json(get_report(&app, "?page=4").await).await;
    assert!(report.data.is_empty());
    assert_eq!(report.pagination.total, 1);
    assert_eq!(report.pagination.total_pages, 1);
}
