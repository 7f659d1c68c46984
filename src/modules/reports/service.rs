use anyhow::anyhow;
use cetis_core::{AppError, PaginationMeta};
use cetis_models::ids::{ReportId, StudentId, TeacherId};
use sqlx::PgPool;
use tracing::instrument;

use crate::metrics::track_report_created;
use crate::modules::reports::model::{
    CreateReportDto, DetailedReport, PaginatedReportsResponse, Report, ReportFilterParams,
    ReviewReportDto,
};

const REPORT_COLUMNS: &str = "id, student_id, group_id, teacher_id, kind, title, description, \
     incident_date, severity, status, actions_taken, created_at, reviewed_at";

/// Reports joined with student, teacher, subject and group names.
const DETAILED_REPORT_SELECT: &str = r#"
    SELECT r.id, r.student_id, r.group_id, r.teacher_id, r.kind, r.title, r.description,
           r.incident_date, r.severity, r.status, r.actions_taken, r.created_at, r.reviewed_at,
           COALESCE(NULLIF(concat_ws(' ',
               NULLIF(btrim(su.first_name), ''),
               NULLIF(btrim(su.paternal_surname), ''),
               NULLIF(btrim(su.maternal_surname), '')), ''), 'Sin nombre') AS student_name,
           COALESCE(NULLIF(concat_ws(' ',
               NULLIF(btrim(tu.first_name), ''),
               NULLIF(btrim(tu.paternal_surname), ''),
               NULLIF(btrim(tu.maternal_surname), '')), ''), 'Docente') AS teacher_name,
           COALESCE(sub.name, 'N/A') AS subject_name,
           COALESCE(g.code, 'N/A') AS group_code
    FROM reports r
    JOIN students s ON s.id = r.student_id
    JOIN users su ON su.id = s.user_id
    JOIN teachers t ON t.id = r.teacher_id
    JOIN users tu ON tu.id = t.user_id
    LEFT JOIN class_groups g ON g.id = r.group_id
    LEFT JOIN subjects sub ON sub.id = g.subject_id"#;

const REPORT_FILTER: &str =
    "($1::INT IS NULL OR r.student_id = $1) AND ($2::report_status IS NULL OR r.status = $2)";

pub struct ReportService;

impl ReportService {
    #[instrument(skip(db))]
    pub async fn create_report(
        db: &PgPool,
        dto: CreateReportDto,
        teacher_id: TeacherId,
    ) -> Result<Report, AppError> {
        let report = sqlx::query_as::<_, Report>(&format!(
            "INSERT INTO reports
                 (student_id, group_id, teacher_id, kind, title, description, incident_date, severity)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {REPORT_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(dto.group_id)
        .bind(teacher_id)
        .bind(dto.kind)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.incident_date)
        .bind(dto.severity)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_insert(e, "Report"))?;

        track_report_created(report.severity);
        Ok(report)
    }

    #[instrument(skip(db))]
    pub async fn get_reports(
        db: &PgPool,
        filters: ReportFilterParams,
    ) -> Result<PaginatedReportsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM reports r WHERE {REPORT_FILTER}"
        ))
        .bind(filters.student_id)
        .bind(filters.status)
        .fetch_one(db)
        .await?;

        let data = sqlx::query_as::<_, DetailedReport>(&format!(
            "{DETAILED_REPORT_SELECT}
             WHERE {REPORT_FILTER}
             ORDER BY r.incident_date DESC, r.id DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filters.student_id)
        .bind(filters.status)
        .bind(filters.pagination.limit())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedReportsResponse {
            data,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_student_reports(
        db: &PgPool,
        student_id: StudentId,
    ) -> Result<Vec<DetailedReport>, AppError> {
        let reports = sqlx::query_as::<_, DetailedReport>(&format!(
            "{DETAILED_REPORT_SELECT}
             WHERE r.student_id = $1
             ORDER BY r.incident_date DESC, r.id DESC"
        ))
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(reports)
    }

    #[instrument(skip(db))]
    pub async fn review_report(
        db: &PgPool,
        id: ReportId,
        dto: ReviewReportDto,
    ) -> Result<Report, AppError> {
        sqlx::query_as::<_, Report>(&format!(
            "UPDATE reports
             SET status = $2, actions_taken = $3, reviewed_at = NOW()
             WHERE id = $1
             RETURNING {REPORT_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.status)
        .bind(&dto.actions_taken)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Report not found")))
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use cetis_core::PaginationParams;
    use cetis_models::reports::{ReportKind, ReportSeverity, ReportStatus};
    use chrono::NaiveDate;

    async fn seed(pool: &PgPool) -> (StudentId, TeacherId) {
        let row: (i32, i32) = sqlx::query_as(
            r#"WITH su AS (
                   INSERT INTO users (first_name, paternal_surname, maternal_surname, email, password, user_type)
                   VALUES ('Ana', 'López', 'García', 'ana@cetis27.edu.mx', 'x', 'estudiante') RETURNING id
               ), tu AS (
                   INSERT INTO users (first_name, paternal_surname, email, password, user_type)
                   VALUES ('Laura', 'Méndez', 'laura@cetis27.edu.mx', 'x', 'docente') RETURNING id
               ), st AS (
                   INSERT INTO students (user_id, control_number, qr_code)
                   SELECT id, 22050001, 'QR-1' FROM su RETURNING id
               ), t AS (
                   INSERT INTO teachers (user_id, employee_number)
                   SELECT id, 'D-001' FROM tu RETURNING id
               )
               SELECT st.id, t.id FROM st, t"#,
        )
        .fetch_one(pool)
        .await
        .unwrap();
        (StudentId(row.0), TeacherId(row.1))
    }

    fn dto(student_id: StudentId, day: u32, title: &str) -> CreateReportDto {
        CreateReportDto {
            student_id,
            group_id: None,
            teacher_id: None,
            kind: ReportKind::Conduct,
            title: title.to_string(),
            description: "Interrumpió la clase".to_string(),
            incident_date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            severity: ReportSeverity::Medium,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_reports_are_listed_newest_first_with_names(pool: PgPool) {
        let (student_id, teacher_id) = seed(&pool).await;
        ReportService::create_report(&pool, dto(student_id, 3, "Primero"), teacher_id)
            .await
            .unwrap();
        ReportService::create_report(&pool, dto(student_id, 10, "Segundo"), teacher_id)
            .await
            .unwrap();

        let reports = ReportService::get_student_reports(&pool, student_id).await.unwrap();
        let titles: Vec<_> = reports.iter().map(|r| r.report.title.as_str()).collect();
        assert_eq!(titles, vec!["Segundo", "Primero"]);
        assert_eq!(reports[0].student_name, "Ana López García");
        assert_eq!(reports[0].teacher_name, "Laura Méndez");
        assert_eq!(reports[0].subject_name, "N/A");
        assert_eq!(reports[0].group_code, "N/A");
        assert_eq!(reports[0].report.status, ReportStatus::Pending);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_review_stamps_reviewed_at(pool: PgPool) {
        let (student_id, teacher_id) = seed(&pool).await;
        let report = ReportService::create_report(&pool, dto(student_id, 3, "Tarea"), teacher_id)
            .await
            .unwrap();
        assert!(report.reviewed_at.is_none());

        let reviewed = ReportService::review_report(
            &pool,
            report.id,
            ReviewReportDto {
                status: ReportStatus::Resolved,
                actions_taken: Some("Citatorio a padres".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(reviewed.status, ReportStatus::Resolved);
        assert!(reviewed.reviewed_at.is_some());

        let filtered = ReportService::get_reports(
            &pool,
            ReportFilterParams {
                student_id: Some(student_id),
                status: Some(ReportStatus::Pending),
                pagination: PaginationParams::default(),
            },
        )
        .await
        .unwrap();
        assert_eq!(filtered.meta.total, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_review_missing_report_is_not_found(pool: PgPool) {
        let err = ReportService::review_report(
            &pool,
            ReportId(404),
            ReviewReportDto {
                status: ReportStatus::Reviewed,
                actions_taken: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
    }
}
