use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "Registrar API";

#[derive(Serialize, ToSchema)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub auth: &'static str,
    pub docs: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// `connected` or `disconnected`.
    pub database: &'static str,
    pub auth: &'static str,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

/// Service descriptor
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "System"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        auth: "Bearer JWT via POST /api/auth/login",
        docs: "/scalar",
    })
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    ),
    tag = "System"
)]
#[instrument(skip_all)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        database,
        auth: "JWT",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
