use cetis_core::{AppError, PaginationMeta};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::specialties::model::{
    CreateSpecialtyDto, PaginatedSpecialtiesResponse, Specialty, SpecialtyFilterParams,
};

pub struct SpecialtyService;

impl SpecialtyService {
    #[instrument(skip(db))]
    pub async fn create_specialty(
        db: &PgPool,
        dto: CreateSpecialtyDto,
    ) -> Result<Specialty, AppError> {
        sqlx::query_as::<_, Specialty>(
            r#"INSERT INTO specialties (name, code, active)
               VALUES ($1, $2, $3)
               RETURNING id, name, code, active, created_at"#,
        )
        .bind(dto.name.trim())
        .bind(dto.code.trim())
        .bind(dto.active.unwrap_or(true))
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_insert(e, "Specialty"))
    }

    #[instrument(skip(db))]
    pub async fn get_specialties(
        db: &PgPool,
        filters: SpecialtyFilterParams,
    ) -> Result<PaginatedSpecialtiesResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM specialties")
            .fetch_one(db)
            .await?;

        let data = sqlx::query_as::<_, Specialty>(
            r#"SELECT id, name, code, active, created_at
               FROM specialties
               ORDER BY name ASC, id ASC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(filters.pagination.limit())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedSpecialtiesResponse {
            data,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }
}
