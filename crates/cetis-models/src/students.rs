//! Student records, the flattened profile and the digital credential.

use cetis_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{SpecialtyId, StudentId, UserId};

/// Control numbers are 14-digit identifiers; JSON clients get them as
/// strings so no precision is lost.
fn control_number_as_string<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

/// Credential QR code: `{prefix}-{control}-{year}-{suffix as 8 uppercase hex digits}`.
pub fn format_qr_code(prefix: &str, control_number: i64, year: i32, suffix: u32) -> String {
    format!("{}-{}-{}-{:08X}", prefix, control_number, year, suffix)
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub user_id: UserId,
    pub specialty_id: Option<SpecialtyId>,
    #[serde(serialize_with = "control_number_as_string")]
    #[schema(value_type = String)]
    pub control_number: i64,
    pub curp: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub semester: i32,
    pub qr_code: String,
    pub enrolled_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    /// Existing user of type `estudiante`
    pub user_id: UserId,
    pub specialty_id: Option<SpecialtyId>,
    #[validate(range(min = 1, message = "controlNumber must be a positive number"))]
    pub control_number: i64,
    #[validate(length(equal = 18, message = "curp must be 18 characters"))]
    pub curp: Option<String>,
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,
    pub address: Option<String>,
    #[validate(range(min = 1, max = 12, message = "semester must be between 1 and 12"))]
    pub semester: Option<i32>,
    /// Generated when omitted
    #[validate(length(min = 1, max = 100, message = "qrCode must be 1-100 characters"))]
    pub qr_code: Option<String>,
    /// Defaults to today
    pub enrolled_on: Option<NaiveDate>,
}

/// Student row joined with its user and specialty, as read from the database.
#[derive(Debug, Clone, FromRow)]
pub struct StudentProfileRow {
    pub student_id: StudentId,
    pub user_id: UserId,
    pub control_number: i64,
    pub first_name: Option<String>,
    pub paternal_surname: Option<String>,
    pub maternal_surname: Option<String>,
    pub specialty_name: Option<String>,
    pub specialty_code: Option<String>,
    pub semester: i32,
    pub email: String,
    pub phone: Option<String>,
    pub qr_code: String,
    pub enrolled_on: Option<NaiveDate>,
    pub curp: Option<String>,
}

/// Flattened student view consumed by the profile and credential screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: StudentId,
    pub user_id: UserId,
    pub control_number: String,
    /// `"Sin nombre"` when the user has no name parts
    pub full_name: String,
    /// `"Sin especialidad"` when unassigned
    pub specialty: String,
    /// `"N/A"` when unassigned
    pub specialty_code: String,
    pub semester: i32,
    pub email: String,
    pub phone: Option<String>,
    /// `"Sin QR"` when blank
    pub qr_code: String,
    /// `YYYY-MM-DD`, or `"N/A"`
    pub enrolled_on: String,
    pub curp: Option<String>,
}

/// Digital student ID card.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentCredential {
    #[serde(flatten)]
    pub profile: StudentProfile,
    /// Text to encode in the QR image: the control number
    pub qr_payload: String,
    /// e.g. `"15 ago 2022"`, or `"Sin fecha"`
    pub enrolled_on_display: String,
    /// Start month of the active period, e.g. `"Febrero 2025"`
    pub issued_on: Option<String>,
    /// End month of the active period, e.g. `"Julio 2025"`
    pub valid_until: Option<String>,
    pub institution: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct StudentFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<StudentProfile>,
    pub meta: PaginationMeta,
}
