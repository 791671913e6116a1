use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{create_group, delete_group, get_group, get_groups, update_group};

pub fn init_groups_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_group).get(get_groups))
        .route(
            "/{id}",
            get(get_group)
                .put(update_group)
                .patch(update_group)
                .delete(delete_group),
        )
}
