use cetis_core::{AppError, PaginationMeta};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::enrollments::model::{
    CreateEnrollmentDto, Enrollment, EnrollmentFilterParams, PaginatedEnrollmentsResponse,
};

const ENROLLMENT_FILTER: &str =
    "($1::INT IS NULL OR student_id = $1) AND ($2::INT IS NULL OR group_id = $2)";

pub struct EnrollmentService;

impl EnrollmentService {
    /// Re-enrolling in a group adds a new row; the newest one is the one
    /// attendance views use.
    #[instrument(skip(db))]
    pub async fn create_enrollment(
        db: &PgPool,
        dto: CreateEnrollmentDto,
    ) -> Result<Enrollment, AppError> {
        sqlx::query_as::<_, Enrollment>(
            r#"INSERT INTO enrollments (student_id, group_id, enrolled_at, active)
               VALUES ($1, $2, COALESCE($3, NOW()), $4)
               RETURNING id, student_id, group_id, enrolled_at, active"#,
        )
        .bind(dto.student_id)
        .bind(dto.group_id)
        .bind(dto.enrolled_at)
        .bind(dto.active.unwrap_or(true))
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_insert(e, "Enrollment"))
    }

    #[instrument(skip(db))]
    pub async fn get_enrollments(
        db: &PgPool,
        filters: EnrollmentFilterParams,
    ) -> Result<PaginatedEnrollmentsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM enrollments WHERE {ENROLLMENT_FILTER}"
        ))
        .bind(filters.student_id)
        .bind(filters.group_id)
        .fetch_one(db)
        .await?;

        let data = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT id, student_id, group_id, enrolled_at, active
             FROM enrollments
             WHERE {ENROLLMENT_FILTER}
             ORDER BY enrolled_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filters.student_id)
        .bind(filters.group_id)
        .bind(filters.pagination.limit())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedEnrollmentsResponse {
            data,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }
}
