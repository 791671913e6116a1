use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_current_user, login_user, register_user};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user))
        .route("/me", get(get_current_user))
}
