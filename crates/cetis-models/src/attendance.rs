//! Attendance records and the per-student attendance views built from them.

use std::fmt;

use cetis_core::serde::deserialize_optional_from_str;
use cetis_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{AttendanceId, EnrollmentId, GroupId, StudentId, SubjectId, TeacherId};

/// Outcome of one class for one student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "attendance_kind")]
pub enum AttendanceKind {
    #[serde(rename = "Asistencia")]
    #[sqlx(rename = "Asistencia")]
    Present,
    #[serde(rename = "Retardo")]
    #[sqlx(rename = "Retardo")]
    Late,
    #[serde(rename = "Falta")]
    #[sqlx(rename = "Falta")]
    Absent,
}

impl AttendanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceKind::Present => "Asistencia",
            AttendanceKind::Late => "Retardo",
            AttendanceKind::Absent => "Falta",
        }
    }
}

impl fmt::Display for AttendanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: AttendanceId,
    pub enrollment_id: EnrollmentId,
    pub teacher_id: Option<TeacherId>,
    pub class_date: NaiveDate,
    #[schema(value_type = Option<String>, example = "07:15:00")]
    pub recorded_time: Option<NaiveTime>,
    pub kind: AttendanceKind,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendanceDto {
    pub enrollment_id: EnrollmentId,
    pub class_date: NaiveDate,
    #[schema(value_type = Option<String>, example = "07:15:00")]
    pub recorded_time: Option<NaiveTime>,
    pub kind: AttendanceKind,
    #[validate(length(max = 500, message = "notes must be at most 500 characters"))]
    pub notes: Option<String>,
    /// Required when an administrator records on a teacher's behalf
    pub teacher_id: Option<TeacherId>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct AttendanceFilterParams {
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
pub struct PaginatedAttendanceResponse {
    pub data: Vec<Attendance>,
    pub meta: PaginationMeta,
}

/// One of a student's enrollments joined with its group, subject and teacher.
#[derive(Debug, Clone, FromRow)]
pub struct EnrolledGroup {
    pub enrollment_id: EnrollmentId,
    pub group_id: GroupId,
    pub enrolled_at: DateTime<Utc>,
    pub group_code: Option<String>,
    pub semester: Option<i32>,
    pub classroom: Option<String>,
    pub subject_id: SubjectId,
    pub subject_name: Option<String>,
    pub subject_code: Option<String>,
    pub teacher_first_name: Option<String>,
    pub teacher_paternal_surname: Option<String>,
    pub teacher_maternal_surname: Option<String>,
}

/// Attendance row tagged with the group of its enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub enrollment_id: EnrollmentId,
    pub group_id: GroupId,
    pub class_date: NaiveDate,
    #[schema(value_type = Option<String>, example = "07:15:00")]
    pub recorded_time: Option<NaiveTime>,
    pub kind: AttendanceKind,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceCounts {
    pub present: u32,
    pub late: u32,
    pub absent: u32,
    pub total: u32,
    /// `round((present + late) / total * 100)`, 0 without classes
    pub percentage: u32,
}

impl AttendanceCounts {
    pub fn tally<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = AttendanceKind>,
    {
        let mut counts = Self::default();
        for kind in kinds {
            counts.record(kind);
        }
        counts
    }

    pub fn record(&mut self, kind: AttendanceKind) {
        match kind {
            AttendanceKind::Present => self.present += 1,
            AttendanceKind::Late => self.late += 1,
            AttendanceKind::Absent => self.absent += 1,
        }
        self.total += 1;
        self.percentage = attendance_percentage(self.present + self.late, self.total);
    }
}

/// `attended / total` as a whole percentage, rounded half up. Late arrivals
/// count as attended.
pub fn attendance_percentage(attended: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (attended, total) = (u64::from(attended), u64::from(total));
    ((200 * attended + total) / (2 * total)) as u32
}

/// Attendance summary for one enrolled group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupAttendanceStats {
    pub group_id: GroupId,
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub subject_code: String,
    pub group_code: String,
    pub semester: i32,
    pub classroom: String,
    pub teacher_name: String,
    pub total_classes: u32,
    pub present: u32,
    pub late: u32,
    pub absent: u32,
    pub attendance_percentage: u32,
    /// Group id as a string, used as the picker value
    pub picker_value: String,
}

/// Entry of the group picker on the attendance screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GroupOption {
    /// `"{subject} - Grupo {code}"`
    pub label: String,
    /// Group id as a string
    pub value: String,
}

/// One line of the spreadsheet view: every record of a single class date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSheetRow {
    pub date: NaiveDate,
    /// `DD/MM/YYYY`
    pub formatted_date: String,
    /// First recorded time of the day, `HH:MM`
    pub time: Option<String>,
    pub present: u32,
    pub late: u32,
    pub absent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSheet {
    pub group_id: GroupId,
    pub subject_name: String,
    /// `"{subject} - {Mes Año}"`
    pub title: String,
    /// Newest date first
    pub rows: Vec<AttendanceSheetRow>,
    pub totals: AttendanceCounts,
    /// Newest date first, recording order within a date
    pub records: Vec<AttendanceRecord>,
}

/// Optional inclusive date window for the spreadsheet view.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceSheetQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
