//! # Registrar Core
//!
//! Core types shared by every Registrar crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page/limit parameters and the metadata returned with list responses
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::errors::AppError;
//! use registrar_core::pagination::{PaginationMeta, PaginationParams};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//!
//! let params = PaginationParams::default();
//! let meta = PaginationMeta::new(42, params.page(), params.limit());
//! ```

pub mod errors;
pub mod pagination;

pub use errors::{AppError, ErrorResponse};
pub use pagination::{PaginationMeta, PaginationParams};
