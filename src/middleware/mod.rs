//! Request authentication.
//!
//! # Authentication Flow
//!
//! 1. [`auth::authenticate`] runs for every request. Public routes pass through.
//! 2. Other requests need `Authorization: Bearer <token>`; the token is
//!    validated by the credential service.
//! 3. The verified claims are stored in the request extensions as
//!    [`auth::AuthUser`].
//! 4. Handlers take `AuthUser` as an extractor and ask the authorization
//!    policy before touching storage.
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn me(auth_user: AuthUser) -> impl IntoResponse {
//!     let user_id = auth_user.user_id();
//!     // ...
//! }
//! ```

pub mod auth;
