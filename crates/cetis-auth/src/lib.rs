//! # CETIS Auth
//!
//! JWT claims and token utilities.
//!
//! A successful login issues one bearer token carrying the user's id, email,
//! [`UserType`] and, for students and teachers, the id of their
//! student/teacher record so scoped requests need no extra lookup.
//!
//! ```ignore
//! use cetis_auth::{UserType, create_access_token, verify_token};
//! use cetis_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(
//!     TokenSubject { user_id: 7, email: "ana@cetis27.edu.mx", user_type: UserType::Student, student_id: Some(3), teacher_id: None },
//!     &config,
//! )?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, UserType};
pub use jwt::{TokenSubject, create_access_token, verify_token};
