//! Loan activity report endpoint.
//!
//! ```text
//! GET /api/v1/reports/loans?start=2024-05-01&end=2024-05-31&page=1
//! ```
//!
//! Row field names are fixed for existing report consumers and are not
//! camelCase. Rows never carry a member's name or email.

use actix_web::{get, web};
use pagination::Pagination;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{LoanReport, LoanReportQuery, LoanReportRow};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Raw report query parameters; parsed by [`LoanReportQuery`].
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoanReportParams {
    /// Earliest loan date, inclusive (`YYYY-MM-DD`).
    #[param(example = "2024-05-01")]
    pub start: Option<String>,
    /// Latest loan date, inclusive (`YYYY-MM-DD`).
    #[param(example = "2024-05-31")]
    pub end: Option<String>,
    /// 1-indexed page number; twenty rows per page.
    #[param(example = "1")]
    pub page: Option<String>,
}

/// One report row.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoanReportRowResponse {
    #[serde(rename = "loanId")]
    pub loan_id: i64,
    /// Member registration number.
    #[schema(example = "88888")]
    pub matricula: String,
    /// Title string.
    pub titulo: String,
    /// Loan date, `YYYY-MM-DD`.
    pub emprestimo: String,
    /// Due date, `YYYY-MM-DD`.
    pub devolucao_prevista: String,
    pub status: String,
}

impl From<LoanReportRow> for LoanReportRowResponse {
    fn from(row: LoanReportRow) -> Self {
        Self {
            loan_id: row.loan_id.get(),
            matricula: row.registration_number.as_ref().to_owned(),
            titulo: row.title,
            emprestimo: row.loaned_on.to_string(),
            devolucao_prevista: row.due_on.to_string(),
            status: row.status.as_str().to_owned(),
        }
    }
}

/// Pagination envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct PaginationResponse {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl From<Pagination> for PaginationResponse {
    fn from(pagination: Pagination) -> Self {
        Self {
            page: pagination.page,
            per_page: pagination.per_page,
            total: pagination.total,
            total_pages: pagination.total_pages,
        }
    }
}

/// One page of the loan report.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoanReportResponse {
    pub data: Vec<LoanReportRowResponse>,
    pub pagination: PaginationResponse,
}

impl From<LoanReport> for LoanReportResponse {
    fn from(report: LoanReport) -> Self {
        let report = report.map(LoanReportRowResponse::from);
        Self {
            data: report.data,
            pagination: report.pagination.into(),
        }
    }
}

/// Page through loans, newest first, optionally bounded by loan date.
#[utoipa::path(
    get,
    path = "/api/v1/reports/loans",
    params(LoanReportParams),
    responses(
        (status = 200, description = "One page of the loan report", body = LoanReportResponse),
        (status = 400, description = "Malformed date or page", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "loanReport"
)]
#[get("/reports/loans")]
pub async fn loan_report(
    state: web::Data<HttpState>,
    params: web::Query<LoanReportParams>,
) -> ApiResult<web::Json<LoanReportResponse>> {
    let LoanReportParams { start, end, page } = params.into_inner();
    let query =
        LoanReportQuery::try_from_parts(start.as_deref(), end.as_deref(), page.as_deref())?;
    let report = state.reports.report(query).await?;
    Ok(web::Json(report.into()))
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
