use registrar_core::{AppError, PaginationMeta};
use registrar_models::teachers::{PaginatedTeachers, Teacher, TeacherDto, TeacherListParams};
use tracing::instrument;

use crate::state::AppState;

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(state))]
    pub async fn list_teachers(
        state: &AppState,
        params: &TeacherListParams,
    ) -> Result<PaginatedTeachers, AppError> {
        let pagination = params.pagination();
        let page = state.store.list_teachers(&params.to_query()?).await?;

        Ok(PaginatedTeachers {
            meta: PaginationMeta::new(page.total, pagination.page(), pagination.limit()),
            items: page.items,
        })
    }

    #[instrument(skip(state))]
    pub async fn get_teacher(state: &AppState, id: i64) -> Result<Teacher, AppError> {
        state
            .store
            .find_teacher(id)
            .await?
            .ok_or_else(|| AppError::not_found("Teacher not found"))
    }

    #[instrument(skip(state, dto))]
    pub async fn create_teacher(state: &AppState, dto: TeacherDto) -> Result<Teacher, AppError> {
        let teacher = state.store.create_teacher(&dto).await?;
        tracing::info!(teacher_id = teacher.id, "Teacher created");
        Ok(teacher)
    }

    #[instrument(skip(state, dto))]
    pub async fn update_teacher(
        state: &AppState,
        id: i64,
        dto: TeacherDto,
    ) -> Result<Teacher, AppError> {
        let teacher = state.store.update_teacher(id, &dto).await?;
        tracing::info!(teacher_id = teacher.id, "Teacher updated");
        Ok(teacher)
    }

    #[instrument(skip(state))]
    pub async fn delete_teacher(state: &AppState, id: i64) -> Result<(), AppError> {
        state.store.delete_teacher(id).await?;
        tracing::info!(teacher_id = id, "Teacher deleted");
        Ok(())
    }
}
