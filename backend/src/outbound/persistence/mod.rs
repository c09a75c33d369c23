//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the member, title and loan repository ports
//! backed by PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain records; business rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Constraint-driven errors**: unique, foreign key and check violations
//!   are identified by constraint name and mapped to port error variants.
//!
//! # Example
//!
//! ```no_run
//! use circulation::outbound::persistence::{DbPool, DieselMemberRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/circulation")).await?;
//! let members = DieselMemberRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_loan_repository;
mod diesel_member_repository;
mod diesel_title_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_loan_repository::DieselLoanRepository;
pub use diesel_member_repository::DieselMemberRepository;
pub use diesel_title_repository::DieselTitleRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
