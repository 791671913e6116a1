use registrar_core::{AppError, PaginationMeta};
use registrar_models::groups::{Group, GroupDto, GroupListParams, PaginatedGroups};
use tracing::instrument;

use crate::state::AppState;

pub struct GroupService;

impl GroupService {
    #[instrument(skip(state))]
    pub async fn list_groups(
        state: &AppState,
        params: &GroupListParams,
    ) -> Result<PaginatedGroups, AppError> {
        let pagination = params.pagination();
        let page = state.store.list_groups(&params.to_query()?).await?;

        Ok(PaginatedGroups {
            meta: PaginationMeta::new(page.total, pagination.page(), pagination.limit()),
            items: page.items,
        })
    }

    #[instrument(skip(state))]
    pub async fn get_group(state: &AppState, id: i64) -> Result<Group, AppError> {
        state
            .store
            .find_group(id)
            .await?
            .ok_or_else(|| AppError::not_found("Group not found"))
    }

    #[instrument(skip(state, dto))]
    pub async fn create_group(state: &AppState, dto: GroupDto) -> Result<Group, AppError> {
        let group = state.store.create_group(&dto).await?;
        tracing::info!(group_id = group.id, "Group created");
        Ok(group)
    }

    #[instrument(skip(state, dto))]
    pub async fn update_group(state: &AppState, id: i64, dto: GroupDto) -> Result<Group, AppError> {
        let group = state.store.update_group(id, &dto).await?;
        tracing::info!(group_id = group.id, "Group updated");
        Ok(group)
    }

    /// Students of the group stay, with their group cleared.
    #[instrument(skip(state))]
    pub async fn delete_group(state: &AppState, id: i64) -> Result<(), AppError> {
        state.store.delete_group(id).await?;
        tracing::info!(group_id = id, "Group deleted");
        Ok(())
    }
}
