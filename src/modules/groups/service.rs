use cetis_core::{AppError, PaginationMeta};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::groups::model::{CreateGroupDto, Group, GroupFilterParams, PaginatedGroupsResponse};

const GROUP_COLUMNS: &str = "id, subject_id, teacher_id, period_id, specialty_id, code, semester, classroom, active, created_at";

const GROUP_FILTER: &str = "($1::INT IS NULL OR period_id = $1)
    AND ($2::INT IS NULL OR subject_id = $2)
    AND ($3::INT IS NULL OR teacher_id = $3)";

pub struct GroupService;

impl GroupService {
    #[instrument(skip(db))]
    pub async fn create_group(db: &PgPool, dto: CreateGroupDto) -> Result<Group, AppError> {
        sqlx::query_as::<_, Group>(&format!(
            "INSERT INTO class_groups
                (subject_id, teacher_id, period_id, specialty_id, code, semester, classroom, active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {GROUP_COLUMNS}"
        ))
        .bind(dto.subject_id)
        .bind(dto.teacher_id)
        .bind(dto.period_id)
        .bind(dto.specialty_id)
        .bind(dto.code.trim())
        .bind(dto.semester)
        .bind(dto.classroom.as_deref().map(str::trim))
        .bind(dto.active.unwrap_or(true))
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_insert(e, "Group"))
    }

    #[instrument(skip(db))]
    pub async fn get_groups(
        db: &PgPool,
        filters: GroupFilterParams,
    ) -> Result<PaginatedGroupsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM class_groups WHERE {GROUP_FILTER}"
        ))
        .bind(filters.period_id)
        .bind(filters.subject_id)
        .bind(filters.teacher_id)
        .fetch_one(db)
        .await?;

        let data = sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM class_groups
             WHERE {GROUP_FILTER}
             ORDER BY code ASC, id ASC
             LIMIT $4 OFFSET $5"
        ))
        .bind(filters.period_id)
        .bind(filters.subject_id)
        .bind(filters.teacher_id)
        .bind(filters.pagination.limit())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedGroupsResponse {
            data,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }
}
