//! # CETIS Core
//!
//! Core types, errors, and utilities shared by every crate of the CETIS
//! portal API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Pagination utilities for list endpoints
//! - [`password`]: bcrypt password hashing and verification
//! - [`dates`]: Spanish (es-MX) date rendering used by the student credential
//! - [`serde`]: Query-string deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use cetis_core::errors::AppError;
//! use cetis_core::pagination::PaginationParams;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//! let hash = cetis_core::hash_password("secret")?;
//! let limit = PaginationParams::default().limit();
//! ```

pub mod dates;
pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
