//! Port abstraction for loan persistence adapters and their errors.
//!
//! [`LoanRepository::issue`] is the only cross-record write in the system:
//! the loan insert and the available-copy decrement must commit together or
//! not at all, and two concurrent issues against a title's last copy must
//! not both succeed.

use async_trait::async_trait;

use crate::domain::{Loan, LoanListing, LoanReport, LoanReportQuery, NewLoan};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by loan repository adapters.
    pub enum LoanRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "loan repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "loan repository query failed: {message}",
        /// The title does not exist or has no copy left.
        Unavailable { title_id: i64 } => "title {title_id} has no available copy",
        /// The referenced member does not exist.
        UnknownMember { member_id: i64 } => "member {member_id} does not exist",
        /// A storage-level check constraint rejected the record.
        Constraint { message: String } => "loan rejected by storage: {message}",
    }
}

/// Port for loan storage, issuance and reporting queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// Atomically take one available copy of the title and record the loan.
    ///
    /// Returns [`LoanRepositoryError::Unavailable`] without writing anything
    /// when the title is missing or has no copy left.
    async fn issue(&self, loan: &NewLoan) -> Result<Loan, LoanRepositoryError>;

    /// Every loan joined with member name and title, highest identifier first.
    async fn list_newest_first(&self) -> Result<Vec<LoanListing>, LoanRepositoryError>;

    /// One page of report rows matching `query`, newest loan first.
    async fn report(&self, query: &LoanReportQuery) -> Result<LoanReport, LoanRepositoryError>;
}
