use anyhow::anyhow;
use cetis_auth::UserType;
use cetis_core::{AppError, PaginationMeta};
use cetis_models::ids::UserId;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherFilterParams, TeacherWithUser,
};

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db))]
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        ensure_user_type(db, dto.user_id, UserType::Teacher).await?;

        sqlx::query_as::<_, Teacher>(
            r#"INSERT INTO teachers (user_id, specialty_id, employee_number)
               VALUES ($1, $2, $3)
               RETURNING id, user_id, specialty_id, employee_number, created_at"#,
        )
        .bind(dto.user_id)
        .bind(dto.specialty_id)
        .bind(dto.employee_number.trim())
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_insert(e, "Teacher"))
    }

    #[instrument(skip(db))]
    pub async fn get_teachers(
        db: &PgPool,
        filters: TeacherFilterParams,
    ) -> Result<PaginatedTeachersResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(db)
            .await?;

        let data = sqlx::query_as::<_, TeacherWithUser>(
            r#"SELECT t.id, t.user_id, t.specialty_id, t.employee_number, u.email,
                      concat_ws(' ',
                          NULLIF(btrim(u.first_name), ''),
                          NULLIF(btrim(u.paternal_surname), ''),
                          NULLIF(btrim(u.maternal_surname), '')) AS full_name
               FROM teachers t
               JOIN users u ON u.id = t.user_id
               ORDER BY u.paternal_surname ASC, u.first_name ASC, t.id ASC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(filters.pagination.limit())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedTeachersResponse {
            data,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }
}

/// Rejects `user_id` unless it names an existing user of `expected` type.
pub async fn ensure_user_type(
    db: &PgPool,
    user_id: UserId,
    expected: UserType,
) -> Result<(), AppError> {
    let user_type = sqlx::query_scalar::<_, UserType>("SELECT user_type FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::bad_request(anyhow!("User {} does not exist", user_id)))?;

    if user_type != expected {
        return Err(AppError::bad_request(anyhow!(
            "User {} is of type {}, expected {}",
            user_id,
            user_type,
            expected
        )));
    }

    Ok(())
}
