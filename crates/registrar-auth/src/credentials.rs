//! Credential service: password hashing and bearer token handling.
//!
//! Tokens are HMAC-signed JWTs. They are issued with HS256 and any HMAC
//! algorithm (HS256/HS384/HS512) is accepted on validation. A token is valid
//! while `nbf <= now < exp`; there is no revocation list.
//!
//! # Example
//!
//! ```ignore
//! let credentials = CredentialService::new(jwt_config, password_config);
//!
//! let hash = credentials.hash_password("secret1")?;
//! assert!(credentials.verify_password("secret1", &hash));
//!
//! let token = credentials.issue_token(7, "a@x.com", Role::Student)?;
//! let claims = credentials.validate_token(&token)?;
//! ```

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};

use registrar_config::{JwtConfig, PasswordConfig};
use registrar_core::AppError;

use crate::claims::Claims;
use crate::role::Role;

const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Why a token was refused. All variants render as 401 except `Signing`.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("unexpected signing method: {0}")]
    UnexpectedAlgorithm(String),
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is not valid yet")]
    NotYetValid,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(_) => AppError::internal(err),
            _ => AppError::unauthorized("Invalid or expired token"),
        }
    }
}

#[derive(Clone)]
pub struct CredentialService {
    jwt: JwtConfig,
    hash_cost: u32,
}

impl std::fmt::Debug for CredentialService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialService")
            .field("expiry_hours", &self.jwt.expiry_hours)
            .field("hash_cost", &self.hash_cost)
            .finish_non_exhaustive()
    }
}

impl CredentialService {
    pub fn new(jwt: JwtConfig, password: PasswordConfig) -> Self {
        Self {
            jwt,
            hash_cost: password.hash_cost,
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.hash_cost)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {e}")))
    }

    /// Unparseable hashes count as a mismatch.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            false
        })
    }

    pub fn issue_token(&self, user_id: i64, email: &str, role: Role) -> Result<String, TokenError> {
        let claims = Claims::new(
            user_id,
            email,
            role,
            Utc::now().timestamp(),
            self.jwt.expiry_seconds(),
        );
        self.sign(&claims, Algorithm::HS256)
    }

    pub(crate) fn sign(&self, claims: &Claims, algorithm: Algorithm) -> Result<String, TokenError> {
        encode(
            &Header::new(algorithm),
            claims,
            &EncodingKey::from_secret(self.jwt.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
        if !ACCEPTED_ALGORITHMS.contains(&header.alg) {
            return Err(TokenError::UnexpectedAlgorithm(format!("{:?}", header.alg)));
        }

        let mut validation = Validation::new(header.alg);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf", "sub"]);

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::ImmatureSignature => TokenError::NotYetValid,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::InvalidAlgorithm => {
                TokenError::UnexpectedAlgorithm(format!("{:?}", header.alg))
            }
            _ => TokenError::Malformed,
        })?;

        // jsonwebtoken treats `exp == now` as still valid.
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> CredentialService {
        CredentialService::new(
            JwtConfig {
                secret: secret.to_string(),
                expiry_hours: 24,
            },
            PasswordConfig { hash_cost: 4 },
        )
    }

    #[test]
    fn test_hash_and_verify_password() {
        let credentials = service("secret");
        let hash = credentials.hash_password("secret1").unwrap();

        assert_ne!(hash, "secret1");
        assert!(credentials.verify_password("secret1", &hash));
        assert!(!credentials.verify_password("secret2", &hash));
    }

    #[test]
    fn test_verify_password_with_garbage_hash_is_false() {
        assert!(!service("secret").verify_password("secret1", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let credentials = service("secret");
        let token = credentials.issue_token(42, "a@x.com", Role::Student).unwrap();
        let claims = credentials.validate_token(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert_eq!(claims.nbf, claims.iat);
    }

    #[test]
    fn test_validation_is_repeatable() {
        let credentials = service("secret");
        let token = credentials.issue_token(1, "t@x.com", Role::Teacher).unwrap();

        let first = credentials.validate_token(&token).unwrap();
        let second = credentials.validate_token(&token).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let credentials = service("secret");
        let now = Utc::now().timestamp();
        let claims = Claims::new(1, "a@x.com", Role::Admin, now - 7200, 3600);
        let token = credentials.sign(&claims, Algorithm::HS256).unwrap();

        assert!(matches!(
            credentials.validate_token(&token),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_token_expiring_now_is_rejected() {
        let credentials = service("secret");
        let now = Utc::now().timestamp();
        let claims = Claims::new(1, "a@x.com", Role::Admin, now - 60, 60);
        let token = credentials.sign(&claims, Algorithm::HS256).unwrap();

        assert!(matches!(
            credentials.validate_token(&token),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_not_yet_valid_token_is_rejected() {
        let credentials = service("secret");
        let now = Utc::now().timestamp();
        let claims = Claims::new(1, "a@x.com", Role::Admin, now + 3600, 3600);
        let token = credentials.sign(&claims, Algorithm::HS256).unwrap();

        assert!(matches!(
            credentials.validate_token(&token),
            Err(TokenError::NotYetValid)
        ));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = service("secret-a")
            .issue_token(1, "a@x.com", Role::Admin)
            .unwrap();

        assert!(matches!(
            service("secret-b").validate_token(&token),
            Err(TokenError::BadSignature)
        ));
    }

    #[test]
    fn test_other_hmac_algorithms_are_accepted() {
        let credentials = service("secret");
        let now = Utc::now().timestamp();
        let claims = Claims::new(3, "a@x.com", Role::Teacher, now, 3600);
        let token = credentials.sign(&claims, Algorithm::HS384).unwrap();

        assert_eq!(credentials.validate_token(&token).unwrap(), claims);
    }

    #[test]
    fn test_non_hmac_algorithm_is_rejected() {
        let credentials = service("secret");
        let token = credentials.issue_token(1, "a@x.com", Role::Admin).unwrap();
        let (_, rest) = token.split_once('.').unwrap();
        // {"alg":"RS256","typ":"JWT"}
        let forged = format!("eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.{rest}");

        assert!(matches!(
            credentials.validate_token(&forged),
            Err(TokenError::UnexpectedAlgorithm(_))
        ));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        assert!(matches!(
            service("secret").validate_token("not.a.token"),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(
            service("secret").validate_token(""),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_token_error_maps_to_unauthorized() {
        let err: AppError = TokenError::Expired.into();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.error.to_string(), "Invalid or expired token");

        let err: AppError = TokenError::Signing("boom".into()).into();
        assert_eq!(err.status.as_u16(), 500);
    }
}
