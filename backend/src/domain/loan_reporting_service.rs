//! Loan activity reporting service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;

use crate::domain::loan_issuer_service::map_loan_error;
use crate::domain::ports::{LoanReporting, LoanRepository};
use crate::domain::{Error, LoanReport, LoanReportQuery};

/// Read-only reporting over the loan repository.
#[derive(Clone)]
pub struct LoanReportingService<L> {
    loans: Arc<L>,
}

impl<L> LoanReportingService<L> {
    /// Create a new service over `loans`.
    pub fn new(loans: Arc<L>) -> Self {
        Self { loans }
    }
}

#[async_trait]
impl<L> LoanReporting for LoanReportingService<L>
where
    L: LoanRepository,
{
    async fn report(&self, query: LoanReportQuery) -> Result<LoanReport, Error> {
        if query.is_empty_range() {
            return Ok(Page::new(Vec::new(), query.page, 0));
        }
        self.loans.report(&query).await.map_err(map_loan_error)
    }
}
