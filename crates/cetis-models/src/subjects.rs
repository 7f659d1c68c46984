//! Subjects (materias) taught within a specialty.

use cetis_core::serde::deserialize_optional_from_str;
use cetis_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{SpecialtyId, SubjectId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    /// `None` for subjects shared by every specialty
    pub specialty_id: Option<SpecialtyId>,
    pub name: String,
    pub code: String,
    pub semester: i32,
    pub weekly_hours: Option<i32>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectDto {
    pub specialty_id: Option<SpecialtyId>,
    #[validate(length(min = 1, max = 150, message = "name must be 1-150 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "code must be 1-20 characters"))]
    pub code: String,
    #[validate(range(min = 1, max = 12, message = "semester must be between 1 and 12"))]
    pub semester: i32,
    #[validate(range(min = 1, max = 40, message = "weeklyHours must be between 1 and 40"))]
    pub weekly_hours: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct SubjectFilterParams {
    #[serde(
        rename = "especialidadId",
        default,
        deserialize_with = "deserialize_optional_from_str"
    )]
    pub specialty_id: Option<SpecialtyId>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedSubjectsResponse {
    pub data: Vec<Subject>,
    pub meta: PaginationMeta,
}
