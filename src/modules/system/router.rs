use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::{health, root};

pub fn init_system_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
