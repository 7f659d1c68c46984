use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use cetis_core::AppError;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::periods::model::{
    ActivePeriodResponse, CreatePeriodDto, PaginatedPeriodsResponse, Period, PeriodFilterParams,
};
use crate::modules::periods::service::PeriodService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/periodos",
    request_body = CreatePeriodDto,
    responses(
        (status = 201, description = "Period created; an active period replaces the current one", body = Period),
        (status = 400, description = "Duplicate code or malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Periods",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_period(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePeriodDto>,
) -> Result<(StatusCode, Json<Period>), AppError> {
    let period = PeriodService::create_period(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(period)))
}

#[utoipa::path(
    get,
    path = "/api/periodos",
    params(PeriodFilterParams),
    responses(
        (status = 200, description = "List of periods, newest first", body = PaginatedPeriodsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Periods",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_periods(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<PeriodFilterParams>,
) -> Result<Json<PaginatedPeriodsResponse>, AppError> {
    let periods = PeriodService::get_periods(&state.db, filters).await?;
    Ok(Json(periods))
}

#[utoipa::path(
    get,
    path = "/api/periodos/activo",
    responses(
        (status = 200, description = "Active period with credential dates", body = ActivePeriodResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No active period", body = ErrorResponse)
    ),
    tag = "Periods",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_active_period(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<ActivePeriodResponse>, AppError> {
    let period = PeriodService::get_active_period(&state.db).await?;
    Ok(Json(period))
}
