use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use registrar_auth::{Operation, Resource};
use registrar_core::{AppError, ErrorResponse};
use registrar_models::students::{
    CreateStudentDto, PaginatedStudents, Student, StudentListParams, UpdateStudentDto,
};

use super::service::StudentService;
use crate::middleware::auth::AuthUser;
use crate::modules::{authorize, parse_id};
use crate::state::AppState;
use crate::validator::parse_json;

#[utoipa::path(
    get,
    path = "/api/students",
    params(
        StudentListParams
    ),
    responses(
        (status = 200, description = "List of students", body = PaginatedStudents),
        (status = 400, description = "Invalid sort field", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn get_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<StudentListParams>,
) -> Result<Json<PaginatedStudents>, AppError> {
    authorize(&state, &auth_user, Resource::Students, Operation::List, None).await?;

    let students = StudentService::list_students(&state, auth_user.claims(), &params).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 400, description = "Invalid student ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn get_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let target = id.trim().parse().ok();
    authorize(&state, &auth_user, Resource::Students, Operation::Read, target).await?;

    let id = parse_id(&id, "student")?;
    let student = StudentService::get_student(&state, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created successfully", body = Student),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn create_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    body: Bytes,
) -> Result<(StatusCode, Json<Student>), AppError> {
    authorize(&state, &auth_user, Resource::Students, Operation::Create, None).await?;

    let dto: CreateStudentDto = parse_json(&body)?;
    let student = StudentService::create_student(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Update a student
///
/// Admins and teachers may update any student; students only their own
/// record, and only its name and surname.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated successfully", body = Student),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn update_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Student>, AppError> {
    let target = id.trim().parse().ok();
    authorize(&state, &auth_user, Resource::Students, Operation::Update, target).await?;

    let id = parse_id(&id, "student")?;
    StudentService::get_student(&state, id).await?;

    let dto: UpdateStudentDto = parse_json(&body)?;
    let student = StudentService::update_student(&state, auth_user.claims(), id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 204, description = "Student deleted successfully"),
        (status = 400, description = "Invalid student ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    authorize(&state, &auth_user, Resource::Students, Operation::Delete, None).await?;

    let id = parse_id(&id, "student")?;
    StudentService::delete_student(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
