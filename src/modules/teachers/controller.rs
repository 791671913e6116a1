use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use registrar_auth::{Operation, Resource};
use registrar_core::{AppError, ErrorResponse};
use registrar_models::teachers::{PaginatedTeachers, Teacher, TeacherDto, TeacherListParams};

use super::service::TeacherService;
use crate::middleware::auth::AuthUser;
use crate::modules::{authorize, parse_id};
use crate::state::AppState;
use crate::validator::parse_json;

#[utoipa::path(
    get,
    path = "/api/teachers",
    params(
        TeacherListParams
    ),
    responses(
        (status = 200, description = "List of teachers", body = PaginatedTeachers),
        (status = 400, description = "Invalid sort field", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip_all)]
pub async fn get_teachers(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<TeacherListParams>,
) -> Result<Json<PaginatedTeachers>, AppError> {
    authorize(&state, &auth_user, Resource::Teachers, Operation::List, None).await?;

    let teachers = TeacherService::list_teachers(&state, &params).await?;
    Ok(Json(teachers))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 400, description = "Invalid teacher ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn get_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Teacher>, AppError> {
    authorize(&state, &auth_user, Resource::Teachers, Operation::Read, None).await?;

    let id = parse_id(&id, "teacher")?;
    let teacher = TeacherService::get_teacher(&state, id).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = TeacherDto,
    responses(
        (status = 201, description = "Teacher created successfully", body = Teacher),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip_all)]
pub async fn create_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    body: Bytes,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    authorize(&state, &auth_user, Resource::Teachers, Operation::Create, None).await?;

    let dto: TeacherDto = parse_json(&body)?;
    let teacher = TeacherService::create_teacher(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

#[utoipa::path(
    put,
    path = "/api/teachers/{id}",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    request_body = TeacherDto,
    responses(
        (status = 200, description = "Teacher updated successfully", body = Teacher),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 409, description = "Email already in use by another teacher", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn update_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Teacher>, AppError> {
    authorize(&state, &auth_user, Resource::Teachers, Operation::Update, None).await?;

    let id = parse_id(&id, "teacher")?;
    TeacherService::get_teacher(&state, id).await?;

    let dto: TeacherDto = parse_json(&body)?;
    let teacher = TeacherService::update_teacher(&state, id, dto).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    delete,
    path = "/api/teachers/{id}",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    responses(
        (status = 204, description = "Teacher deleted successfully"),
        (status = 400, description = "Invalid teacher ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    authorize(&state, &auth_user, Resource::Teachers, Operation::Delete, None).await?;

    let id = parse_id(&id, "teacher")?;
    TeacherService::delete_teacher(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
