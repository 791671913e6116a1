//! # Registrar Auth
//!
//! Authentication and authorization building blocks:
//!
//! - [`role`]: the three account roles
//! - [`claims`]: identity claims carried by bearer tokens
//! - [`credentials`]: password hashing and token issuing/validation
//! - [`policy`]: role and ownership checks run by every resource handler
//!
//! # Example
//!
//! ```ignore
//! use registrar_auth::{CredentialService, Role};
//! use registrar_config::{JwtConfig, PasswordConfig};
//!
//! let credentials = CredentialService::new(JwtConfig::from_env(), PasswordConfig::from_env());
//! let token = credentials.issue_token(1, "admin@example.com", Role::Admin)?;
//! let claims = credentials.validate_token(&token)?;
//! assert_eq!(claims.role, Role::Admin);
//! ```

pub mod claims;
pub mod credentials;
pub mod policy;
pub mod role;

pub use claims::Claims;
pub use credentials::{CredentialService, TokenError};
pub use policy::{Decision, Denial, ListScope, Operation, Policy, Resource};
pub use role::Role;
