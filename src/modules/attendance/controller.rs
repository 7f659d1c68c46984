use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use cetis_core::AppError;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::attendance::model::{
    Attendance, AttendanceFilterParams, CreateAttendanceDto, PaginatedAttendanceResponse,
};
use crate::modules::attendance::service::AttendanceService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Teachers record as themselves; administrators may pass `teacherId`.
#[utoipa::path(
    post,
    path = "/api/asistencias",
    request_body = CreateAttendanceDto,
    responses(
        (status = 201, description = "Attendance recorded", body = Attendance),
        (status = 400, description = "Unknown enrollment or malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - staff only", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateAttendanceDto>,
) -> Result<(StatusCode, Json<Attendance>), AppError> {
    let teacher_id = auth_user.acting_teacher_id(dto.teacher_id)?;
    let attendance = AttendanceService::create_attendance(&state.db, dto, teacher_id).await?;
    Ok((StatusCode::CREATED, Json(attendance)))
}

#[utoipa::path(
    get,
    path = "/api/asistencias",
    params(AttendanceFilterParams),
    responses(
        (status = 200, description = "Attendance records, newest class first", body = PaginatedAttendanceResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Student asked for another student's attendance", body = ErrorResponse)
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(mut filters): Query<AttendanceFilterParams>,
) -> Result<Json<PaginatedAttendanceResponse>, AppError> {
    filters.student_id = auth_user.scope_student_filter(filters.student_id)?;
    let attendance = AttendanceService::get_attendance(&state.db, filters).await?;
    Ok(Json(attendance))
}
