//! Disciplinary reports.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use cetis_core::serde::deserialize_optional_from_str;
use cetis_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::ids::{GroupId, ReportId, StudentId, TeacherId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "report_kind")]
pub enum ReportKind {
    #[serde(rename = "falta_tarea")]
    #[sqlx(rename = "falta_tarea")]
    MissingHomework,
    #[serde(rename = "conducta")]
    #[sqlx(rename = "conducta")]
    Conduct,
    #[serde(rename = "otra")]
    #[sqlx(rename = "otra")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "report_severity")]
pub enum ReportSeverity {
    #[serde(rename = "ALTA")]
    #[sqlx(rename = "ALTA")]
    High,
    #[serde(rename = "MEDIA")]
    #[sqlx(rename = "MEDIA")]
    Medium,
    #[serde(rename = "BAJA")]
    #[sqlx(rename = "BAJA")]
    Low,
}

impl ReportSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportSeverity::High => "ALTA",
            ReportSeverity::Medium => "MEDIA",
            ReportSeverity::Low => "BAJA",
        }
    }
}

impl fmt::Display for ReportSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a report.
///
/// Serialized with its stored spelling; parsed case-insensitively so that
/// `"PENDIENTE"` or `"Revisado"` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "report_status")]
pub enum ReportStatus {
    #[serde(rename = "Pendiente")]
    #[sqlx(rename = "Pendiente")]
    Pending,
    #[serde(rename = "revisado")]
    #[sqlx(rename = "revisado")]
    Reviewed,
    #[serde(rename = "resuelto")]
    #[sqlx(rename = "resuelto")]
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pendiente",
            ReportStatus::Reviewed => "revisado",
            ReportStatus::Resolved => "resuelto",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" => Ok(ReportStatus::Pending),
            "revisado" => Ok(ReportStatus::Reviewed),
            "resuelto" => Ok(ReportStatus::Resolved),
            other => Err(format!("unknown report status: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for ReportStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub student_id: StudentId,
    pub group_id: Option<GroupId>,
    pub teacher_id: TeacherId,
    pub kind: ReportKind,
    pub title: String,
    pub description: String,
    pub incident_date: NaiveDate,
    pub severity: ReportSeverity,
    pub status: ReportStatus,
    pub actions_taken: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportDto {
    pub student_id: StudentId,
    /// Omitted for incidents outside a class
    pub group_id: Option<GroupId>,
    /// Required when an administrator files on a teacher's behalf
    pub teacher_id: Option<TeacherId>,
    pub kind: ReportKind,
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub incident_date: NaiveDate,
    pub severity: ReportSeverity,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReportDto {
    /// `revisado` or `resuelto`
    #[validate(custom(function = "validate_review_status"))]
    pub status: ReportStatus,
    pub actions_taken: Option<String>,
}

fn validate_review_status(status: &ReportStatus) -> Result<(), ValidationError> {
    if *status == ReportStatus::Pending {
        return Err(ValidationError::new("review_status")
            .with_message(Cow::Borrowed("status must be revisado or resuelto")));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ReportFilterParams {
    #[serde(
        rename = "estudianteId",
        default,
        deserialize_with = "deserialize_optional_from_str"
    )]
    pub student_id: Option<StudentId>,
    #[serde(
        rename = "estado",
        default,
        deserialize_with = "deserialize_optional_from_str"
    )]
    pub status: Option<ReportStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Report joined with the names shown on the student's reports screen.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailedReport {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub report: Report,
    pub student_name: String,
    pub teacher_name: String,
    /// `"N/A"` when the report has no group
    pub subject_name: String,
    /// `"N/A"` when the report has no group
    pub group_code: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedReportsResponse {
    pub data: Vec<DetailedReport>,
    pub meta: PaginationMeta,
}
