//! Authentication and authorization.
//!
//! - [`auth`]: the [`auth::AuthUser`] extractor and student scoping helpers
//! - [`role`]: route layers restricting a router to admins or staff
//!
//! Every `/api` route except login extracts `AuthUser`, so a missing or
//! invalid bearer token is always a 401 before any handler logic runs.

pub mod auth;
pub mod role;
