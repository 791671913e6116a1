use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use registrar_auth::{Operation, Resource};
use registrar_core::{AppError, ErrorResponse};
use registrar_models::groups::{Group, GroupDto, GroupListParams, PaginatedGroups};

use super::service::GroupService;
use crate::middleware::auth::AuthUser;
use crate::modules::{authorize, parse_id};
use crate::state::AppState;
use crate::validator::parse_json;

#[utoipa::path(
    get,
    path = "/api/groups",
    params(
        GroupListParams
    ),
    responses(
        (status = 200, description = "List of groups", body = PaginatedGroups),
        (status = 400, description = "Invalid sort field", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Groups"
)]
#[instrument(skip_all)]
pub async fn get_groups(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<GroupListParams>,
) -> Result<Json<PaginatedGroups>, AppError> {
    authorize(&state, &auth_user, Resource::Groups, Operation::List, None).await?;

    let groups = GroupService::list_groups(&state, &params).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/api/groups/{id}",
    params(
        ("id" = i64, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Group details", body = Group),
        (status = 400, description = "Invalid group ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Groups"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn get_group(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Group>, AppError> {
    authorize(&state, &auth_user, Resource::Groups, Operation::Read, None).await?;

    let id = parse_id(&id, "group")?;
    let group = GroupService::get_group(&state, id).await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = GroupDto,
    responses(
        (status = 201, description = "Group created successfully", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 409, description = "Code already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Groups"
)]
#[instrument(skip_all)]
pub async fn create_group(
    State(state): State<AppState>,
    auth_user: AuthUser,
    body: Bytes,
) -> Result<(StatusCode, Json<Group>), AppError> {
    authorize(&state, &auth_user, Resource::Groups, Operation::Create, None).await?;

    let dto: GroupDto = parse_json(&body)?;
    let group = GroupService::create_group(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    put,
    path = "/api/groups/{id}",
    params(
        ("id" = i64, Path, description = "Group ID")
    ),
    request_body = GroupDto,
    responses(
        (status = 200, description = "Group updated successfully", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 409, description = "Code already in use by another group", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Groups"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn update_group(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Group>, AppError> {
    authorize(&state, &auth_user, Resource::Groups, Operation::Update, None).await?;

    let id = parse_id(&id, "group")?;
    GroupService::get_group(&state, id).await?;

    let dto: GroupDto = parse_json(&body)?;
    let group = GroupService::update_group(&state, id, dto).await?;
    Ok(Json(group))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{id}",
    params(
        ("id" = i64, Path, description = "Group ID")
    ),
    responses(
        (status = 204, description = "Group deleted successfully"),
        (status = 400, description = "Invalid group ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Groups"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_group(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    authorize(&state, &auth_user, Resource::Groups, Operation::Delete, None).await?;

    let id = parse_id(&id, "group")?;
    GroupService::delete_group(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
