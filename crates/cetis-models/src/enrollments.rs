//! Enrollments (inscripciones) of students in class groups.
//!
//! A student may hold several enrollments in the same group (e.g. after
//! re-enrolling); readers treat the most recent one as authoritative.

use cetis_core::serde::deserialize_optional_from_str;
use cetis_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{EnrollmentId, GroupId, StudentId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub group_id: GroupId,
    pub enrolled_at: DateTime<Utc>,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentDto {
    pub student_id: StudentId,
    pub group_id: GroupId,
    /// Defaults to now
    pub enrolled_at: Option<DateTime<Utc>>,
    /// Defaults to `true`
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct EnrollmentFilterParams {
    #[serde(
        rename = "estudianteId",
        default,
        deserialize_with = "deserialize_optional_from_str"
    )]
    pub student_id: Option<StudentId>,
    #[serde(
        rename = "grupoId",
        default,
        deserialize_with = "deserialize_optional_from_str"
    )]
    pub group_id: Option<GroupId>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedEnrollmentsResponse {
    pub data: Vec<Enrollment>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_enrollment_dto_optional_fields() {
        let dto: CreateEnrollmentDto =
            serde_json::from_str(r#"{"studentId":3,"groupId":8}"#).unwrap();
        assert_eq!(dto.student_id, StudentId(3));
        assert_eq!(dto.group_id, GroupId(8));
        assert!(dto.enrolled_at.is_none());
        assert!(dto.active.is_none());
    }
}
