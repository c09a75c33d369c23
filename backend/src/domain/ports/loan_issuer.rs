//! Driving port for issuing loans.

use async_trait::async_trait;

use crate::domain::{Error, Loan, LoanListing, LoanRequest};

/// Domain use-case port for issuing and listing loans.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanIssuer: Send + Sync {
    /// Lend one copy of a title to a member.
    async fn issue(&self, request: LoanRequest) -> Result<Loan, Error>;

    /// Every loan with member and title names, newest first.
    async fn list(&self) -> Result<Vec<LoanListing>, Error>;
}
