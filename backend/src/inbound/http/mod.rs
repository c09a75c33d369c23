//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod loans;
pub mod members;
pub mod reports;
pub mod routes;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod titles;
pub mod validation;

pub use error::ApiResult;
