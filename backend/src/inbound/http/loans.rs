//! Loan issuing endpoints.
//!
//! ```text
//! GET  /api/v1/loans
//! POST /api/v1/loans {"memberId":1,"bookId":2,"memberType":"STUDENT"}
//! ```

use actix_web::{get, post, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LoanListing, LoanRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Loan request payload. `bookId` names the title to lend.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueLoanRequest {
    #[schema(example = 1)]
    pub member_id: i64,
    #[schema(example = 2)]
    pub book_id: i64,
    /// Must match the member's registered type.
    #[schema(example = "STUDENT")]
    pub member_type: String,
}

/// Loan listing row.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    pub loan_id: i64,
    pub member_id: i64,
    pub member_name: String,
    pub title_id: i64,
    pub title: String,
    /// RFC 3339 UTC timestamp.
    #[schema(example = "2024-05-01T09:00:00Z")]
    pub loaned_at: String,
    /// `YYYY-MM-DD`.
    #[schema(example = "2024-05-15")]
    pub due_on: String,
    pub status: String,
}

impl From<LoanListing> for LoanResponse {
    fn from(loan: LoanListing) -> Self {
        Self {
            loan_id: loan.loan_id.get(),
            member_id: loan.member_id.get(),
            member_name: loan.member_name.as_ref().to_owned(),
            title_id: loan.title_id.get(),
            title: loan.title,
            loaned_at: loan.loaned_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            due_on: loan.due_on.to_string(),
            status: loan.status.as_str().to_owned(),
        }
    }
}

async fn loan_list(state: &HttpState) -> ApiResult<Vec<LoanResponse>> {
    let loans = state.loans.list().await?;
    Ok(loans.into_iter().map(LoanResponse::from).collect())
}

/// List every loan with member and title names, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/loans",
    responses(
        (status = 200, description = "Loans, newest first", body = [LoanResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["loans"],
    operation_id = "listLoans"
)]
#[get("/loans")]
pub async fn list_loans(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<LoanResponse>>> {
    Ok(web::Json(loan_list(&state).await?))
}

/// Lend one copy of a title and return the refreshed loan listing.
#[utoipa::path(
    post,
    path = "/api/v1/loans",
    request_body = IssueLoanRequest,
    responses(
        (status = 200, description = "Loan issued; current loan listing", body = [LoanResponse]),
        (status = 400, description = "Invalid request or item unavailable", body = ErrorSchema),
        (status = 404, description = "Unknown member", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["loans"],
    operation_id = "issueLoan"
)]
#[post("/loans")]
pub async fn issue_loan(
    state: web::Data<HttpState>,
    payload: web::Json<IssueLoanRequest>,
) -> ApiResult<web::Json<Vec<LoanResponse>>> {
    let IssueLoanRequest {
        member_id,
        book_id,
        member_type,
    } = payload.into_inner();
    let request = LoanRequest::try_from_parts(member_id, book_id, &member_type)?;
    state.loans.issue(request).await?;
    Ok(web::Json(loan_list(&state).await?))
}

#[cfg(test)]
#[path = "loans_tests.rs"]
mod tests;
