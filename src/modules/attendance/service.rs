use anyhow::anyhow;
use cetis_core::{AppError, PaginationMeta};
use cetis_models::ids::{GroupId, StudentId, TeacherId};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use crate::metrics::track_attendance_recorded;
use crate::modules::attendance::model::{
    Attendance, AttendanceFilterParams, AttendanceRecord, AttendanceSheet, AttendanceSheetQuery,
    CreateAttendanceDto, EnrolledGroup, GroupAttendanceStats, GroupOption,
    PaginatedAttendanceResponse,
};
use crate::modules::attendance::{sheet, stats};

const ATTENDANCE_FILTER: &str =
    "($1::INT IS NULL OR e.student_id = $1) AND ($2::INT IS NULL OR e.group_id = $2)";

pub struct AttendanceService;

impl AttendanceService {
    /// `teacher_id` is the teacher recording the class, if known.
    #[instrument(skip(db))]
    pub async fn create_attendance(
        db: &PgPool,
        dto: CreateAttendanceDto,
        teacher_id: Option<TeacherId>,
    ) -> Result<Attendance, AppError> {
        let attendance = sqlx::query_as::<_, Attendance>(
            r#"INSERT INTO attendances (enrollment_id, teacher_id, class_date, recorded_time, kind, notes)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, enrollment_id, teacher_id, class_date, recorded_time, kind, notes, recorded_at"#,
        )
        .bind(dto.enrollment_id)
        .bind(teacher_id)
        .bind(dto.class_date)
        .bind(dto.recorded_time)
        .bind(dto.kind)
        .bind(&dto.notes)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_insert(e, "Attendance"))?;

        track_attendance_recorded(attendance.kind);
        Ok(attendance)
    }

    #[instrument(skip(db))]
    pub async fn get_attendance(
        db: &PgPool,
        filters: AttendanceFilterParams,
    ) -> Result<PaginatedAttendanceResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*)
             FROM attendances a
             JOIN enrollments e ON e.id = a.enrollment_id
             WHERE {ATTENDANCE_FILTER}"
        ))
        .bind(filters.student_id)
        .bind(filters.group_id)
        .fetch_one(db)
        .await?;

        let data = sqlx::query_as::<_, Attendance>(&format!(
            "SELECT a.id, a.enrollment_id, a.teacher_id, a.class_date, a.recorded_time,
                    a.kind, a.notes, a.recorded_at
             FROM attendances a
             JOIN enrollments e ON e.id = a.enrollment_id
             WHERE {ATTENDANCE_FILTER}
             ORDER BY a.class_date DESC, a.id ASC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filters.student_id)
        .bind(filters.group_id)
        .bind(filters.pagination.limit())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedAttendanceResponse {
            data,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    /// Every enrollment of the student with its group, subject and teacher,
    /// oldest enrollment first.
    #[instrument(skip(db))]
    pub async fn get_enrolled_groups(
        db: &PgPool,
        student_id: StudentId,
    ) -> Result<Vec<EnrolledGroup>, AppError> {
        let groups = sqlx::query_as::<_, EnrolledGroup>(
            r#"SELECT e.id AS enrollment_id, e.group_id, e.enrolled_at,
                      g.code AS group_code, g.semester, g.classroom,
                      g.subject_id, s.name AS subject_name, s.code AS subject_code,
                      u.first_name AS teacher_first_name,
                      u.paternal_surname AS teacher_paternal_surname,
                      u.maternal_surname AS teacher_maternal_surname
               FROM enrollments e
               JOIN class_groups g ON g.id = e.group_id
               LEFT JOIN subjects s ON s.id = g.subject_id
               LEFT JOIN teachers t ON t.id = g.teacher_id
               LEFT JOIN users u ON u.id = t.user_id
               WHERE e.student_id = $1
               ORDER BY e.id ASC"#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(groups)
    }

    /// All attendance of the student across enrollments, tagged by group.
    #[instrument(skip(db))]
    pub async fn get_student_records(
        db: &PgPool,
        student_id: StudentId,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"SELECT a.id, a.enrollment_id, e.group_id, a.class_date, a.recorded_time,
                      a.kind, a.notes
               FROM attendances a
               JOIN enrollments e ON e.id = a.enrollment_id
               WHERE e.student_id = $1
               ORDER BY a.class_date DESC, a.id ASC"#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(records)
    }

    #[instrument(skip(db))]
    pub async fn get_group_stats(
        db: &PgPool,
        student_id: StudentId,
    ) -> Result<Vec<GroupAttendanceStats>, AppError> {
        let enrollments = Self::get_enrolled_groups(db, student_id).await?;
        let records = Self::get_student_records(db, student_id).await?;
        Ok(stats::build_group_stats(&enrollments, &records))
    }

    #[instrument(skip(db))]
    pub async fn get_group_options(
        db: &PgPool,
        student_id: StudentId,
    ) -> Result<Vec<GroupOption>, AppError> {
        let enrollments = Self::get_enrolled_groups(db, student_id).await?;
        Ok(stats::group_options(&enrollments))
    }

    /// Spreadsheet view of one group. Fails with 404 when the student has
    /// never been enrolled in it.
    #[instrument(skip(db))]
    pub async fn get_attendance_sheet(
        db: &PgPool,
        student_id: StudentId,
        group_id: GroupId,
        query: AttendanceSheetQuery,
        today: NaiveDate,
    ) -> Result<AttendanceSheet, AppError> {
        let enrollments = Self::get_enrolled_groups(db, student_id).await?;
        let enrollment = enrollments
            .iter()
            .find(|e| e.group_id == group_id)
            .ok_or_else(|| AppError::not_found(anyhow!("Student is not enrolled in this group")))?;
        let subject_name = stats::subject_name(enrollment);

        let records: Vec<AttendanceRecord> = Self::get_student_records(db, student_id)
            .await?
            .into_iter()
            .filter(|r| r.group_id == group_id)
            .collect();
        let records = sheet::filter_by_range(records, &query);

        Ok(sheet::build_attendance_sheet(
            group_id,
            &subject_name,
            records,
            today,
        ))
    }
}
