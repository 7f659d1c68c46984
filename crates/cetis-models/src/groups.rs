//! Class groups: one subject taught to one cohort in one period.

use cetis_core::serde::deserialize_optional_from_str;
use cetis_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{GroupId, PeriodId, SpecialtyId, SubjectId, TeacherId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub subject_id: SubjectId,
    pub teacher_id: Option<TeacherId>,
    pub period_id: PeriodId,
    pub specialty_id: Option<SpecialtyId>,
    /// e.g. `"5AM"`
    pub code: String,
    pub semester: Option<i32>,
    pub classroom: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupDto {
    pub subject_id: SubjectId,
    pub teacher_id: Option<TeacherId>,
    pub period_id: PeriodId,
    pub specialty_id: Option<SpecialtyId>,
    #[validate(length(min = 1, max = 20, message = "code must be 1-20 characters"))]
    pub code: String,
    #[validate(range(min = 1, max = 12, message = "semester must be between 1 and 12"))]
    pub semester: Option<i32>,
    #[validate(length(max = 50, message = "classroom must be at most 50 characters"))]
    pub classroom: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct GroupFilterParams {
    #[serde(
        rename = "periodoId",
        default,
        deserialize_with = "deserialize_optional_from_str"
    )]
    pub period_id: Option<PeriodId>,
    #[serde(
        rename = "materiaId",
        default,
        deserialize_with = "deserialize_optional_from_str"
    )]
    pub subject_id: Option<SubjectId>,
    #[serde(
        rename = "docenteId",
        default,
        deserialize_with = "deserialize_optional_from_str"
    )]
    pub teacher_id: Option<TeacherId>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedGroupsResponse {
    pub data: Vec<Group>,
    pub meta: PaginationMeta,
}
