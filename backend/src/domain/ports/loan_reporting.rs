//! Driving port for the paginated loan report.

use async_trait::async_trait;

use crate::domain::{Error, LoanReport, LoanReportQuery};

/// Domain use-case port for the loan activity report.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanReporting: Send + Sync {
    /// One page of privacy-redacted report rows.
    async fn report(&self, query: LoanReportQuery) -> Result<LoanReport, Error>;
}
