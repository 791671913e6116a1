use registrar_auth::Role;
use registrar_core::AppError;
use registrar_models::auth::{AuthResponse, LoginRequest, NewAccount, RegisterRequest};
use registrar_models::users::UserProfile;
use tracing::instrument;

use crate::state::AppState;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const USER_EXISTS: &str = "User with this email already exists";

pub struct AuthService;

impl AuthService {
    /// Unknown emails and wrong passwords are indistinguishable to the client.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn login_user(state: &AppState, dto: LoginRequest) -> Result<AuthResponse, AppError> {
        let Some(user) = state.store.find_user_by_email(dto.email.trim()).await? else {
            tracing::info!("Login failed: unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !state.credentials.verify_password(&dto.password, &user.password_hash) {
            tracing::info!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let response = Self::auth_response(state, user.id, &user.email, user.role).await?;
        tracing::info!(user_id = user.id, role = %user.role, "User logged in");
        Ok(response)
    }

    /// Creates the account and its placeholder student or teacher record in
    /// one store transaction.
    #[instrument(skip_all, fields(email = %dto.email, role = %dto.role))]
    pub async fn register_user(
        state: &AppState,
        dto: RegisterRequest,
    ) -> Result<AuthResponse, AppError> {
        if dto.role == Role::Admin && !state.policy_config.allow_admin_registration {
            return Err(AppError::forbidden("Admin accounts cannot be self-registered"));
        }

        let email = dto.email.trim().to_string();
        if state.store.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(USER_EXISTS));
        }

        let password_hash = state.credentials.hash_password(&dto.password)?;
        let user = state
            .store
            .register_user(NewAccount {
                email,
                password_hash,
                role: dto.role,
            })
            .await?;

        let response = Self::auth_response(state, user.id, &user.email, user.role).await?;
        tracing::info!(user_id = user.id, "User registered");
        Ok(response)
    }

    #[instrument(skip(state))]
    pub async fn get_profile(state: &AppState, user_id: i64) -> Result<UserProfile, AppError> {
        state
            .store
            .find_user_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    async fn auth_response(
        state: &AppState,
        user_id: i64,
        email: &str,
        role: Role,
    ) -> Result<AuthResponse, AppError> {
        let token = state.credentials.issue_token(user_id, email, role)?;
        let user = Self::get_profile(state, user_id).await?;
        Ok(AuthResponse { token, user })
    }
}
