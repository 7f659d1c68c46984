//! User accounts.
//!
//! Every person with a login (student, teacher or administrative staff) is a
//! `users` row. Students and teachers additionally own a `students` or
//! `teachers` row pointing back to it.

use cetis_auth::UserType;
use cetis_core::serde::deserialize_optional_from_str;
use cetis_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::UserId;

/// User as returned by the API. The password hash is never selected.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub paternal_surname: String,
    pub maternal_surname: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub user_type: UserType,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 100, message = "firstName must be 1-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "paternalSurname must be 1-100 characters"))]
    pub paternal_surname: String,
    #[validate(length(max = 100, message = "maternalSurname must be at most 100 characters"))]
    pub maternal_surname: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub user_type: UserType,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserFilterParams {
    /// `estudiante`, `admon` or `docente`
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub user_type: Option<UserType>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}

/// Joins name parts, skipping missing or blank ones.
///
/// Returns an empty string when no part has content.
pub fn join_name_parts(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
