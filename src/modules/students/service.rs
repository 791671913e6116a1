use registrar_auth::{Claims, ListScope, Role};
use registrar_core::{AppError, PaginationMeta};
use registrar_models::students::{
    CreateStudentDto, PaginatedStudents, Student, StudentListParams, UpdateStudentDto,
};
use tracing::instrument;

use crate::state::AppState;

pub struct StudentService;

impl StudentService {
    /// Lists students, limited to the caller's own record when the listing
    /// scope requires it.
    #[instrument(skip(state, claims), fields(user_id = claims.user_id))]
    pub async fn list_students(
        state: &AppState,
        claims: &Claims,
        params: &StudentListParams,
    ) -> Result<PaginatedStudents, AppError> {
        let pagination = params.pagination();
        let mut query = params.to_query()?;

        if state.policy.student_list_scope(claims) == ListScope::OwnRecordOnly {
            match state.store.find_student_by_user(claims.user_id).await? {
                Some(own) => query.only_id = Some(own.id),
                None => {
                    return Ok(PaginatedStudents {
                        meta: PaginationMeta::new(0, pagination.page(), pagination.limit()),
                        items: Vec::new(),
                    });
                }
            }
        }

        let page = state.store.list_students(&query).await?;
        Ok(PaginatedStudents {
            meta: PaginationMeta::new(page.total, pagination.page(), pagination.limit()),
            items: page.items,
        })
    }

    #[instrument(skip(state))]
    pub async fn get_student(state: &AppState, id: i64) -> Result<Student, AppError> {
        state
            .store
            .find_student(id)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))
    }

    #[instrument(skip(state, dto))]
    pub async fn create_student(
        state: &AppState,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        let student = state.store.create_student(&dto).await?;
        tracing::info!(student_id = student.id, "Student created");
        Ok(student)
    }

    /// Students may only change their own name and surname.
    #[instrument(skip(state, claims, dto), fields(user_id = claims.user_id))]
    pub async fn update_student(
        state: &AppState,
        claims: &Claims,
        id: i64,
        mut dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        if claims.role == Role::Student {
            dto.email = None;
            dto.group_id = None;
        }

        let student = state.store.update_student(id, &dto).await?;
        tracing::info!(student_id = student.id, "Student updated");
        Ok(student)
    }

    #[instrument(skip(state))]
    pub async fn delete_student(state: &AppState, id: i64) -> Result<(), AppError> {
        state.store.delete_student(id).await?;
        tracing::info!(student_id = id, "Student deleted");
        Ok(())
    }
}
