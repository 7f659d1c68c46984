//! Teachers (docentes).

use cetis_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{SpecialtyId, TeacherId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    pub user_id: UserId,
    pub specialty_id: Option<SpecialtyId>,
    pub employee_number: String,
    pub created_at: DateTime<Utc>,
}

/// Teacher joined with the owning user's name and email.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherWithUser {
    pub id: TeacherId,
    pub user_id: UserId,
    pub specialty_id: Option<SpecialtyId>,
    pub employee_number: String,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeacherDto {
    /// Existing user of type `docente`
    pub user_id: UserId,
    pub specialty_id: Option<SpecialtyId>,
    #[validate(length(min = 1, max = 30, message = "employeeNumber must be 1-30 characters"))]
    pub employee_number: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct TeacherFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedTeachersResponse {
    pub data: Vec<TeacherWithUser>,
    pub meta: PaginationMeta,
}
