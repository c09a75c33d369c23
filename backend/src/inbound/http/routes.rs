//! Route table for the REST API.

use actix_web::web;

use crate::inbound::http::loans::{issue_loan, list_loans};
use crate::inbound::http::members::{index, list_members, register_member};
use crate::inbound::http::reports::loan_report;
use crate::inbound::http::titles::{list_titles, register_title};
use crate::inbound::http::validation::{json_config, query_config};

/// Register the `/api/v1` resources, the root redirect and the extractor
/// error handlers on an application or scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use circulation::inbound::http::routes::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(index)
        .service(
            web::scope("/api/v1")
                .service(list_members)
                .service(register_member)
                .service(list_titles)
                .service(register_title)
                .service(list_loans)
                .service(issue_loan)
                .service(loan_report),
        );
}
