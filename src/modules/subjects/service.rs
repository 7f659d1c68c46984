use cetis_core::{AppError, PaginationMeta};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::subjects::model::{
    CreateSubjectDto, PaginatedSubjectsResponse, Subject, SubjectFilterParams,
};

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db))]
    pub async fn create_subject(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(
            r#"INSERT INTO subjects (specialty_id, name, code, semester, weekly_hours, active)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, specialty_id, name, code, semester, weekly_hours, active, created_at"#,
        )
        .bind(dto.specialty_id)
        .bind(dto.name.trim())
        .bind(dto.code.trim())
        .bind(dto.semester)
        .bind(dto.weekly_hours)
        .bind(dto.active.unwrap_or(true))
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_insert(e, "Subject"))
    }

    #[instrument(skip(db))]
    pub async fn get_subjects(
        db: &PgPool,
        filters: SubjectFilterParams,
    ) -> Result<PaginatedSubjectsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM subjects WHERE ($1::INT IS NULL OR specialty_id = $1)",
        )
        .bind(filters.specialty_id)
        .fetch_one(db)
        .await?;

        let data = sqlx::query_as::<_, Subject>(
            r#"SELECT id, specialty_id, name, code, semester, weekly_hours, active, created_at
               FROM subjects
               WHERE ($1::INT IS NULL OR specialty_id = $1)
               ORDER BY semester ASC, name ASC, id ASC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(filters.specialty_id)
        .bind(filters.pagination.limit())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedSubjectsResponse {
            data,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }
}
