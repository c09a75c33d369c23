//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters and
//! report failures through enums generated by `define_port_error!`.
//! Driving ports (`MemberRegistry`, `Catalog`, `LoanIssuer`,
//! `LoanReporting`) are implemented by domain services and consumed by
//! inbound adapters; they speak the domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod catalog;
mod loan_issuer;
mod loan_reporting;
mod loan_repository;
mod member_registry;
mod member_repository;
mod title_repository;

pub use catalog::Catalog;
#[cfg(test)]
pub use catalog::MockCatalog;
pub use loan_issuer::LoanIssuer;
#[cfg(test)]
pub use loan_issuer::MockLoanIssuer;
pub use loan_reporting::LoanReporting;
#[cfg(test)]
pub use loan_reporting::MockLoanReporting;
#[cfg(test)]
pub use loan_repository::MockLoanRepository;
pub use loan_repository::{LoanRepository, LoanRepositoryError};
pub use member_registry::MemberRegistry;
#[cfg(test)]
pub use member_registry::MockMemberRegistry;
#[cfg(test)]
pub use member_repository::MockMemberRepository;
pub use member_repository::{MemberRepository, MemberRepositoryError};
#[cfg(test)]
pub use title_repository::MockTitleRepository;
pub use title_repository::{TitleRepository, TitleRepositoryError};
