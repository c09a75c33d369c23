//! Loan issuance service.
//!
//! Issuing a loan looks the member up first, confirms the caller's member
//! type against the stored record, computes the due date from the stored
//! type and then hands the atomic copy-take-and-insert to the loan
//! repository.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::member_registry_service::map_member_error;
use crate::domain::ports::{LoanIssuer, LoanRepository, LoanRepositoryError, MemberRepository};
use crate::domain::{Error, Loan, LoanListing, LoanRequest, MemberId, NewLoan};

/// Loan issuer backed by member and loan repositories.
#[derive(Clone)]
pub struct LoanIssuerService<M, L> {
    members: Arc<M>,
    loans: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<M, L> LoanIssuerService<M, L> {
    /// Create a new service; `clock` stamps each loan.
    pub fn new(members: Arc<M>, loans: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            members,
            loans,
            clock,
        }
    }
}

fn unknown_member(member_id: MemberId) -> Error {
    Error::not_found(format!("member {member_id} does not exist")).with_details(json!({
        "field": "memberId",
        "code": "unknown_member",
    }))
}

pub(crate) fn map_loan_error(error: LoanRepositoryError) -> Error {
    match error {
        LoanRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("loan repository unavailable: {message}"))
        }
        LoanRepositoryError::Query { message } => {
            Error::internal(format!("loan repository error: {message}"))
        }
        LoanRepositoryError::Unavailable { .. } => Error::item_unavailable(),
        LoanRepositoryError::UnknownMember { member_id } => unknown_member(MemberId::new(member_id)),
        LoanRepositoryError::Constraint { message } => Error::invalid_request(message),
    }
}

#[async_trait]
impl<M, L> LoanIssuer for LoanIssuerService<M, L>
where
    M: MemberRepository,
    L: LoanRepository,
{
    async fn issue(&self, request: LoanRequest) -> Result<Loan, Error> {
        let member = self
            .members
            .find_by_id(request.member_id)
            .await
            .map_err(map_member_error)?
            .ok_or_else(|| unknown_member(request.member_id))?;
        request.confirm_member_type(member.member_type)?;

        let new_loan = NewLoan::issue(
            member.id,
            request.title_id,
            member.member_type,
            self.clock.utc(),
        );
        let loan = self.loans.issue(&new_loan).await.map_err(|err| {
            if matches!(err, LoanRepositoryError::Unavailable { .. }) {
                warn!(title_id = %request.title_id, member_id = %member.id, "loan rejected: item unavailable");
            }
            map_loan_error(err)
        })?;

        info!(
            loan_id = %loan.id,
            member_id = %loan.member_id,
            title_id = %loan.title_id,
            due_on = %loan.due_on,
            "loan issued"
        );
        Ok(loan)
    }

    async fn list(&self) -> Result<Vec<LoanListing>, Error> {
        self.loans.list_newest_first().await.map_err(map_loan_error)
    }
}

#[cfg(test)]
#[path = "loan_issuer_service_tests.rs"]
mod tests;
