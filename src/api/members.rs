//! Member endpoints
//!
//! Unlike books, members are addressed by email in the request body.

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        member::{CreateMember, Member, MemberEmail, MemberSearchResponse, UpdateMember},
        MessageResponse, SearchRequest,
    },
    AppState,
};

use super::ApiJson;

/// Add a member
#[utoipa::path(
    post,
    path = "/add_member",
    tag = "members",
    request_body = CreateMember,
    responses(
        (status = 200, description = "Member added, or `error` when the email is taken", body = MessageResponse)
    )
)]
pub async fn add_member(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<CreateMember>,
) -> AppResult<Json<MessageResponse>> {
    state.services.members.add(&data).await?;
    Ok(Json(MessageResponse::new("Member added successfully")))
}

/// List all members
#[utoipa::path(
    get,
    path = "/get_members",
    tag = "members",
    responses(
        (status = 200, description = "All members", body = Vec<Member>)
    )
)]
pub async fn get_members(State(state): State<AppState>) -> AppResult<Json<Vec<Member>>> {
    let members = state.services.members.list().await?;
    Ok(Json(members))
}

/// Update a member's name
#[utoipa::path(
    put,
    path = "/update_member",
    tag = "members",
    request_body = UpdateMember,
    responses(
        (status = 200, description = "Member updated, or `error` when not found", body = MessageResponse)
    )
)]
pub async fn update_member(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<UpdateMember>,
) -> AppResult<Json<MessageResponse>> {
    state.services.members.update(&data).await?;
    Ok(Json(MessageResponse::new("Member updated successfully")))
}

/// Delete a member
#[utoipa::path(
    delete,
    path = "/delete_member",
    tag = "members",
    request_body = MemberEmail,
    responses(
        (status = 200, description = "Member deleted, or `error` when not found", body = MessageResponse)
    )
)]
pub async fn delete_member(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<MemberEmail>,
) -> AppResult<Json<MessageResponse>> {
    state.services.members.delete(&data).await?;
    Ok(Json(MessageResponse::new("Member deleted successfully")))
}

/// Search members by name or email
#[utoipa::path(
    post,
    path = "/search_members",
    tag = "members",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matches, a no-match message, or `error` on empty query", body = MemberSearchResponse)
    )
)]
pub async fn search_members(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SearchRequest>,
) -> AppResult<Json<MemberSearchResponse>> {
    let results = state.services.members.search(&request.query).await?;
    Ok(Json(results))
}
