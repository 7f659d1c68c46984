use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use cetis_core::AppError;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::enrollments::model::{
    CreateEnrollmentDto, Enrollment, EnrollmentFilterParams, PaginatedEnrollmentsResponse,
};
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/inscripciones",
    request_body = CreateEnrollmentDto,
    responses(
        (status = 201, description = "Enrollment created", body = Enrollment),
        (status = 400, description = "Unknown student or group, or malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateEnrollmentDto>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    let enrollment = EnrollmentService::create_enrollment(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// Students only see their own enrollments.
#[utoipa::path(
    get,
    path = "/api/inscripciones",
    params(EnrollmentFilterParams),
    responses(
        (status = 200, description = "List of enrollments, newest first", body = PaginatedEnrollmentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Student asked for another student's enrollments", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(mut filters): Query<EnrollmentFilterParams>,
) -> Result<Json<PaginatedEnrollmentsResponse>, AppError> {
    filters.student_id = auth_user.scope_student_filter(filters.student_id)?;
    let enrollments = EnrollmentService::get_enrollments(&state.db, filters).await?;
    Ok(Json(enrollments))
}
