//! Library circulation backend: members, titles, loans and the loan report.
//!
//! The crate follows a hexagonal layout. [`domain`] holds entities,
//! validation, services and ports; [`inbound`] adapts HTTP requests onto the
//! driving ports; [`outbound`] implements the driven ports over PostgreSQL
//! or process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
