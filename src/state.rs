use std::sync::Arc;

use registrar_auth::{CredentialService, Policy};
use registrar_config::{AppConfig, CorsConfig, PolicyConfig};
use registrar_db::{PgStore, RecordStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub credentials: CredentialService,
    pub policy: Policy,
    pub policy_config: PolicyConfig,
    pub cors_config: CorsConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("credentials", &self.credentials)
            .field("policy", &self.policy)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: &AppConfig) -> Self {
        Self {
            store,
            credentials: CredentialService::new(config.jwt.clone(), config.password.clone()),
            policy: Policy::from(&config.policy),
            policy_config: config.policy.clone(),
            cors_config: config.cors.clone(),
        }
    }
}

/// Connects to PostgreSQL, applies migrations and builds the state.
pub async fn init_app_state(config: &AppConfig) -> Result<AppState, StoreError> {
    let store = PgStore::connect(&config.database).await?;
    store.migrate().await?;
    tracing::info!("Database connected and migrations applied");

    Ok(AppState::new(Arc::new(store), config))
}
