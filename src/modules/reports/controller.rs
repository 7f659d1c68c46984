use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use cetis_core::AppError;
use cetis_models::ids::ReportId;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::reports::model::{
    CreateReportDto, PaginatedReportsResponse, Report, ReportFilterParams, ReviewReportDto,
};
use crate::modules::reports::service::ReportService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Teachers file reports as themselves; administrators must pass `teacherId`.
#[utoipa::path(
    post,
    path = "/api/reportes",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created with status Pendiente", body = Report),
        (status = 400, description = "Missing teacherId, unknown student or group", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - staff only", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Reports",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_report(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateReportDto>,
) -> Result<(StatusCode, Json<Report>), AppError> {
    let teacher_id = auth_user
        .acting_teacher_id(dto.teacher_id)?
        .ok_or_else(|| AppError::bad_request(anyhow!("teacherId is required")))?;

    let report = ReportService::create_report(&state.db, dto, teacher_id).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

#[utoipa::path(
    get,
    path = "/api/reportes",
    params(ReportFilterParams),
    responses(
        (status = 200, description = "Reports, most recent incident first", body = PaginatedReportsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Student asked for another student's reports", body = ErrorResponse)
    ),
    tag = "Reports",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_reports(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(mut filters): Query<ReportFilterParams>,
) -> Result<Json<PaginatedReportsResponse>, AppError> {
    filters.student_id = auth_user.scope_student_filter(filters.student_id)?;
    let reports = ReportService::get_reports(&state.db, filters).await?;
    Ok(Json(reports))
}

#[utoipa::path(
    put,
    path = "/api/reportes/{id}/revision",
    params(
        ("id" = i32, Path, description = "Report ID")
    ),
    request_body = ReviewReportDto,
    responses(
        (status = 200, description = "Report reviewed", body = Report),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - staff only", body = ErrorResponse),
        (status = 404, description = "Report not found", body = ErrorResponse),
        (status = 422, description = "Status must be revisado or resuelto", body = ErrorResponse)
    ),
    tag = "Reports",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn review_report(
    State(state): State<AppState>,
    Path(id): Path<ReportId>,
    ValidatedJson(dto): ValidatedJson<ReviewReportDto>,
) -> Result<Json<Report>, AppError> {
    let report = ReportService::review_report(&state.db, id, dto).await?;
    Ok(Json(report))
}
