//! Member registration endpoints.
//!
//! ```text
//! GET  /api/v1/members
//! POST /api/v1/members {"name":"Ana","registrationNumber":"12345","memberType":"STUDENT"}
//! ```

use actix_web::{HttpResponse, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Member, NewMember};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Registration payload. Missing strings are treated as empty so that
/// field-level validation reports them.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterMemberRequest {
    #[schema(example = "Ana Souza")]
    pub name: String,
    /// Exactly five ASCII digits.
    #[schema(example = "12345")]
    pub registration_number: String,
    /// `STUDENT`, `TEACHER` or `STAFF`.
    #[schema(example = "STUDENT")]
    pub member_type: String,
    #[schema(example = "ana@example.org")]
    pub email: Option<String>,
}

/// Member as returned by the API.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub name: String,
    pub registration_number: String,
    pub member_type: String,
    pub email: Option<String>,
    /// Registration date, `YYYY-MM-DD`.
    #[schema(example = "2024-05-01")]
    pub registered_on: String,
    pub status: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.get(),
            name: member.name.as_ref().to_owned(),
            registration_number: member.registration_number.as_ref().to_owned(),
            member_type: member.member_type.as_str().to_owned(),
            email: member.email.map(|email| email.as_ref().to_owned()),
            registered_on: member.registered_on.to_string(),
            status: member.status.as_str().to_owned(),
        }
    }
}

async fn member_list(state: &HttpState) -> ApiResult<Vec<MemberResponse>> {
    let members = state.members.list().await?;
    Ok(members.into_iter().map(MemberResponse::from).collect())
}

/// List every member, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/members",
    responses(
        (status = 200, description = "Members, newest first", body = [MemberResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["members"],
    operation_id = "listMembers"
)]
#[get("/members")]
pub async fn list_members(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<MemberResponse>>> {
    Ok(web::Json(member_list(&state).await?))
}

/// Register a member and return the refreshed member list.
#[utoipa::path(
    post,
    path = "/api/v1/members",
    request_body = RegisterMemberRequest,
    responses(
        (status = 200, description = "Member registered; current member list", body = [MemberResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Duplicate registration number or email", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["members"],
    operation_id = "registerMember"
)]
#[post("/members")]
pub async fn register_member(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterMemberRequest>,
) -> ApiResult<web::Json<Vec<MemberResponse>>> {
    let RegisterMemberRequest {
        name,
        registration_number,
        member_type,
        email,
    } = payload.into_inner();
    let member =
        NewMember::try_from_parts(&name, &registration_number, &member_type, email.as_deref())?;
    state.members.register(member).await?;
    Ok(web::Json(member_list(&state).await?))
}

/// Send the bare root to the member list.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 307, description = "Redirect to the member list")),
    tags = ["members"],
    operation_id = "index"
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, "/api/v1/members"))
        .finish()
}

#[cfg(test)]
#[path = "members_tests.rs"]
mod tests;
