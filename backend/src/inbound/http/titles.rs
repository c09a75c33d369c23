//! Catalog endpoints.
//!
//! ```text
//! GET  /api/v1/titles
//! POST /api/v1/titles {"title":"Dom Casmurro","authors":"Machado de Assis","totalCopies":2}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{NewTitle, Title};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Title registration payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterTitleRequest {
    #[schema(example = "Dom Casmurro")]
    pub title: String,
    #[schema(example = "Machado de Assis")]
    pub authors: String,
    /// 10 to 13 characters when present.
    #[schema(example = "9788535910663")]
    pub isbn: Option<String>,
    pub edition: Option<String>,
    #[schema(example = 1899)]
    pub year: Option<i64>,
    /// Must be greater than zero.
    #[schema(example = 2)]
    pub total_copies: i64,
}

/// Title as returned by the API.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TitleResponse {
    pub id: i64,
    pub title: String,
    pub authors: String,
    pub isbn: Option<String>,
    pub edition: Option<String>,
    pub year: Option<i32>,
    pub total_copies: i32,
    pub available_copies: i32,
    /// `AVAILABLE` or `UNAVAILABLE`.
    pub status: String,
}

impl From<Title> for TitleResponse {
    fn from(title: Title) -> Self {
        Self {
            id: title.id.get(),
            title: title.title,
            authors: title.authors,
            isbn: title.isbn,
            edition: title.edition,
            year: title.year,
            total_copies: title.total_copies,
            available_copies: title.available_copies,
            status: title.status.as_str().to_owned(),
        }
    }
}

async fn title_list(state: &HttpState) -> ApiResult<Vec<TitleResponse>> {
    let titles = state.catalog.list().await?;
    Ok(titles.into_iter().map(TitleResponse::from).collect())
}

/// List every title, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/titles",
    responses(
        (status = 200, description = "Titles, newest first", body = [TitleResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["titles"],
    operation_id = "listTitles"
)]
#[get("/titles")]
pub async fn list_titles(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TitleResponse>>> {
    Ok(web::Json(title_list(&state).await?))
}

/// Register a title with all copies available and return the refreshed list.
#[utoipa::path(
    post,
    path = "/api/v1/titles",
    request_body = RegisterTitleRequest,
    responses(
        (status = 200, description = "Title registered; current title list", body = [TitleResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["titles"],
    operation_id = "registerTitle"
)]
#[post("/titles")]
pub async fn register_title(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterTitleRequest>,
) -> ApiResult<web::Json<Vec<TitleResponse>>> {
    let RegisterTitleRequest {
        title,
        authors,
        isbn,
        edition,
        year,
        total_copies,
    } = payload.into_inner();
    let title = NewTitle::try_from_parts(
        &title,
        &authors,
        isbn.as_deref(),
        edition.as_deref(),
        year,
        total_copies,
    )?;
    state.catalog.register(title).await?;
    Ok(web::Json(title_list(&state).await?))
}
