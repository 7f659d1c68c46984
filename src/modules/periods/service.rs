use anyhow::anyhow;
use cetis_core::dates::month_year_es;
use cetis_core::{AppError, PaginationMeta};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::modules::periods::model::{
    ActivePeriodResponse, CreatePeriodDto, PaginatedPeriodsResponse, Period, PeriodFilterParams,
};

const PERIOD_COLUMNS: &str = "id, code, name, start_date, end_date, active, created_at";

pub struct PeriodService;

impl PeriodService {
    /// Inserts a period. An active period replaces the current one in the
    /// same transaction.
    #[instrument(skip(db))]
    pub async fn create_period(db: &PgPool, dto: CreatePeriodDto) -> Result<Period, AppError> {
        let active = dto.active.unwrap_or(false);
        let mut tx = db.begin().await?;

        if active {
            let deactivated = sqlx::query("UPDATE periods SET active = FALSE WHERE active")
                .execute(&mut *tx)
                .await?
                .rows_affected();
            if deactivated > 0 {
                info!(code = %dto.code, "Deactivating previous active period");
            }
        }

        let period = sqlx::query_as::<_, Period>(&format!(
            "INSERT INTO periods (code, name, start_date, end_date, active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PERIOD_COLUMNS}"
        ))
        .bind(dto.code.trim())
        .bind(dto.name.trim())
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(active)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_insert(e, "Period"))?;

        tx.commit().await?;

        Ok(period)
    }

    #[instrument(skip(db))]
    pub async fn get_periods(
        db: &PgPool,
        filters: PeriodFilterParams,
    ) -> Result<PaginatedPeriodsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM periods")
            .fetch_one(db)
            .await?;

        let data = sqlx::query_as::<_, Period>(&format!(
            "SELECT {PERIOD_COLUMNS} FROM periods
             ORDER BY start_date DESC, id DESC
             LIMIT $1 OFFSET $2"
        ))
        .bind(filters.pagination.limit())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedPeriodsResponse {
            data,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db))]
    pub async fn find_active_period(db: &PgPool) -> Result<Option<Period>, AppError> {
        let period = sqlx::query_as::<_, Period>(&format!(
            "SELECT {PERIOD_COLUMNS} FROM periods WHERE active LIMIT 1"
        ))
        .fetch_optional(db)
        .await?;

        Ok(period)
    }

    #[instrument(skip(db))]
    pub async fn get_active_period(db: &PgPool) -> Result<ActivePeriodResponse, AppError> {
        let period = Self::find_active_period(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("No active period")))?;

        Ok(ActivePeriodResponse {
            issued_on: month_year_es(period.start_date),
            valid_until: month_year_es(period.end_date),
            period,
        })
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dto(code: &str, start: NaiveDate, end: NaiveDate) -> CreatePeriodDto {
        CreatePeriodDto {
            code: code.to_string(),
            name: format!("Periodo {}", code),
            start_date: start,
            end_date: end,
            active: Some(true),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_no_active_period_is_not_found(pool: PgPool) {
        let err = PeriodService::get_active_period(&pool).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_activating_replaces_previous_active(pool: PgPool) {
        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        let first = PeriodService::create_period(&pool, dto("2025-1", d(2, 1), d(7, 15)))
            .await
            .unwrap();
        let second = PeriodService::create_period(&pool, dto("2025-2", d(8, 25), d(12, 19)))
            .await
            .unwrap();

        let active = PeriodService::get_active_period(&pool).await.unwrap();
        assert_eq!(active.period.id, second.id);
        assert_eq!(active.issued_on, "Agosto 2025");
        assert_eq!(active.valid_until, "Diciembre 2025");

        let page = PeriodService::get_periods(
            &pool,
            PeriodFilterParams {
                pagination: Default::default(),
            },
        )
        .await
        .unwrap();
        let first_now = page.data.iter().find(|p| p.id == first.id).unwrap();
        assert!(!first_now.active);
    }
}
