//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::Value;

use crate::middleware::Trace;
use crate::inbound::http::routes::configure_api;
use crate::inbound::http::state::HttpState;
use crate::test_support::FixedClock;

/// Clock frozen at 2024-05-01T09:00:00Z.
pub fn fixed_clock() -> Arc<FixedClock> {
    let clock = FixedClock::at_midnight(2024, 5, 1);
    clock.advance(chrono::TimeDelta::hours(9));
    Arc::new(clock)
}

/// Application serving the full API over `state`, wrapped in [`Trace`].
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}

/// Extract `(code, details.field, details.code)` from an error payload.
pub fn error_parts(body: &Value) -> (Option<&str>, Option<&str>, Option<&str>) {
    (
        body.get("code").and_then(Value::as_str),
        body.pointer("/details/field").and_then(Value::as_str),
        body.pointer("/details/code").and_then(Value::as_str),
    )
}
