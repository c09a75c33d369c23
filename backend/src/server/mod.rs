//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use tracing::info;

use circulation::Trace;
#[cfg(debug_assertions)]
use circulation::doc::ApiDoc;
use circulation::inbound::http::health::{HealthState, live, ready};
use circulation::inbound::http::routes::configure_api;
use circulation::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

#[cfg(feature = "metrics")]
fn default_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("circulation")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let prometheus = match prometheus {
        Some(prometheus) => prometheus,
        None => default_metrics()?,
    };

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use std::net::SocketAddr;

    #[rstest]
    #[actix_web::test]
    async fn app_serves_api_and_probes() {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)));
        let app = actix_test::init_service(build_app(health, build_http_state(&config))).await;

        for uri in ["/api/v1/members", "/api/v1/reports/loans", "/health/ready", "/health/live"] {
            let response =
                actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                    .await;
            assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
            assert!(response.headers().contains_key("trace-id"), "GET {uri}");
        }
    }
}
