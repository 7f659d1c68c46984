//! Specialties (technical career tracks).

use cetis_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::SpecialtyId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    pub id: SpecialtyId,
    pub name: String,
    /// Short code, e.g. `"PROG"`
    pub code: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpecialtyDto {
    #[validate(length(min = 1, max = 150, message = "name must be 1-150 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "code must be 1-20 characters"))]
    pub code: String,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct SpecialtyFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedSpecialtiesResponse {
    pub data: Vec<Specialty>,
    pub meta: PaginationMeta,
}
