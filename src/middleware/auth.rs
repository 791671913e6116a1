use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, header, request::Parts},
    middleware::Next,
    response::Response,
};

use registrar_auth::Claims;
use registrar_core::AppError;

use crate::state::AppState;

/// Routes reachable without a token.
#[derive(Debug, Clone, Copy)]
pub struct PublicRoutes {
    exact: &'static [&'static str],
    prefixes: &'static [&'static str],
}

/// `/api/auth/me` needs a token, so auth routes are listed one by one.
pub const PUBLIC_ROUTES: PublicRoutes = PublicRoutes {
    exact: &[
        "/",
        "/health",
        "/api/auth/login",
        "/api/auth/register",
        "/api-docs/openapi.json",
    ],
    prefixes: &["/scalar"],
};

impl PublicRoutes {
    pub fn is_public(&self, path: &str) -> bool {
        self.exact.contains(&path) || self.prefixes.iter().any(|p| path.starts_with(p))
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(value: Option<&HeaderValue>) -> Result<&str, AppError> {
    let value = value.ok_or_else(|| AppError::unauthorized("Authorization header required"))?;

    let invalid = || AppError::unauthorized("Invalid authorization format");
    let raw = value.to_str().map_err(|_| invalid())?;

    match raw.split(' ').collect::<Vec<_>>().as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => Err(invalid()),
    }
}

/// Authenticates every non-public request and stores the verified
/// [`AuthUser`] in the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if PUBLIC_ROUTES.is_public(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;
    let claims = state.credentials.validate_token(token).map_err(|e| {
        tracing::warn!(reason = %e, path = %req.uri().path(), "Token rejected");
        AppError::from(e)
    })?;

    tracing::debug!(user_id = claims.user_id, role = %claims.role, "Request authenticated");
    req.extensions_mut().insert(AuthUser(claims));

    Ok(next.run(req).await)
}

/// The authenticated caller, as attached by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn claims(&self) -> &Claims {
        &self.0
    }

    pub fn user_id(&self) -> i64 {
        self.0.user_id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Not authenticated"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request as HttpRequest, StatusCode};
    use registrar_auth::Role;

    #[test]
    fn test_public_routes() {
        assert!(PUBLIC_ROUTES.is_public("/"));
        assert!(PUBLIC_ROUTES.is_public("/health"));
        assert!(PUBLIC_ROUTES.is_public("/api/auth/login"));
        assert!(PUBLIC_ROUTES.is_public("/api/auth/register"));
        assert!(PUBLIC_ROUTES.is_public("/scalar"));
        assert!(PUBLIC_ROUTES.is_public("/api-docs/openapi.json"));

        assert!(!PUBLIC_ROUTES.is_public("/api/auth/me"));
        assert!(!PUBLIC_ROUTES.is_public("/api/students"));
        assert!(!PUBLIC_ROUTES.is_public("/healthz"));
    }

    #[test]
    fn test_bearer_token_parsing() {
        let ok = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(bearer_token(Some(&ok)).unwrap(), "abc.def.ghi");

        let missing = bearer_token(None).unwrap_err();
        assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
        assert_eq!(missing.error.to_string(), "Authorization header required");

        for raw in ["Basic abc", "Bearer", "Bearer a b", "bearer abc", "Bearer  abc", "abc"] {
            let value = HeaderValue::from_static(raw);
            let err = bearer_token(Some(&value)).unwrap_err();
            assert_eq!(err.error.to_string(), "Invalid authorization format", "{raw}");
        }
    }

    #[tokio::test]
    async fn test_auth_user_reads_extensions() {
        let claims = Claims::new(7, "a@x.com", Role::Teacher, 1_700_000_000, 3600);
        let mut req = HttpRequest::new(());
        req.extensions_mut().insert(AuthUser(claims.clone()));
        let (mut parts, _) = req.into_parts();

        let auth_user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(auth_user.claims(), &claims);
        assert_eq!(auth_user.user_id(), 7);
    }

    #[tokio::test]
    async fn test_auth_user_missing_is_unauthorized() {
        let (mut parts, _) = HttpRequest::new(()).into_parts();
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), "Not authenticated");
    }
}
