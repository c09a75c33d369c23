//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the error schemas ([`ErrorSchema`], [`ErrorCodeSchema`]) that
//! describe domain errors without coupling domain types to utoipa.
//!
//! Swagger UI serves the document at `/docs` in debug builds.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Circulation API",
        description = "Member registration, catalog, loan issuing and loan reporting for a small library."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::members::index,
        crate::inbound::http::members::list_members,
        crate::inbound::http::members::register_member,
        crate::inbound::http::titles::list_titles,
        crate::inbound::http::titles::register_title,
        crate::inbound::http::loans::list_loans,
        crate::inbound::http::loans::issue_loan,
        crate::inbound::http::reports::loan_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "members", description = "Member registration"),
        (name = "titles", description = "Catalog of lendable titles"),
        (name = "loans", description = "Loan issuing"),
        (name = "reports", description = "Paginated loan activity report"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
