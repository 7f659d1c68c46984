use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use cetis_core::AppError;
use cetis_models::ids::{GroupId, StudentId};
use chrono::Local;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::attendance::model::{
    AttendanceSheet, AttendanceSheetQuery, GroupAttendanceStats, GroupOption,
};
use crate::modules::attendance::service::AttendanceService;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::reports::model::DetailedReport;
use crate::modules::reports::service::ReportService;
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentCredential, StudentFilterParams,
    StudentProfile,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Without `qrCode` one is generated from the institution code, control
/// number and enrollment year.
#[utoipa::path(
    post,
    path = "/api/estudiantes",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "User is not an estudiante, or duplicate control number or QR", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student =
        StudentService::create_student(&state.db, dto, &state.institution.code).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/estudiantes",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "Student profiles", body = PaginatedStudentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - staff only", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    Query(filters): Query<StudentFilterParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let students = StudentService::get_students(&state.db, filters).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/estudiantes/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Flattened student profile", body = StudentProfile),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Student asked for another student", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<StudentId>,
) -> Result<Json<StudentProfile>, AppError> {
    auth_user.ensure_can_read_student(id)?;
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    get,
    path = "/api/estudiantes/{id}/credencial",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Digital credential; issuedOn/validUntil are null without an active period", body = StudentCredential),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Student asked for another student", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_credential(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<StudentId>,
) -> Result<Json<StudentCredential>, AppError> {
    auth_user.ensure_can_read_student(id)?;
    let credential = StudentService::get_credential(&state.db, id, &state.institution).await?;
    Ok(Json(credential))
}

#[utoipa::path(
    get,
    path = "/api/estudiantes/{id}/asistencias/estadisticas",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Attendance summary per enrolled group", body = Vec<GroupAttendanceStats>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Student asked for another student", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_attendance_stats(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<StudentId>,
) -> Result<Json<Vec<GroupAttendanceStats>>, AppError> {
    auth_user.ensure_can_read_student(id)?;
    StudentService::ensure_student_exists(&state.db, id).await?;
    let stats = AttendanceService::get_group_stats(&state.db, id).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/estudiantes/{id}/asistencias/grupos",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Group picker entries", body = Vec<GroupOption>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Student asked for another student", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_attendance_groups(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<StudentId>,
) -> Result<Json<Vec<GroupOption>>, AppError> {
    auth_user.ensure_can_read_student(id)?;
    StudentService::ensure_student_exists(&state.db, id).await?;
    let options = AttendanceService::get_group_options(&state.db, id).await?;
    Ok(Json(options))
}

#[utoipa::path(
    get,
    path = "/api/estudiantes/{id}/grupos/{grupoId}/asistencias",
    params(
        ("id" = i32, Path, description = "Student ID"),
        ("grupoId" = i32, Path, description = "Group ID"),
        AttendanceSheetQuery
    ),
    responses(
        (status = 200, description = "Attendance sheet of the group", body = AttendanceSheet),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Student asked for another student", body = ErrorResponse),
        (status = 404, description = "Student not found or not enrolled in the group", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_attendance_sheet(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, group_id)): Path<(StudentId, GroupId)>,
    Query(query): Query<AttendanceSheetQuery>,
) -> Result<Json<AttendanceSheet>, AppError> {
    auth_user.ensure_can_read_student(id)?;
    StudentService::ensure_student_exists(&state.db, id).await?;
    let today = Local::now().date_naive();
    let sheet =
        AttendanceService::get_attendance_sheet(&state.db, id, group_id, query, today).await?;
    Ok(Json(sheet))
}

#[utoipa::path(
    get,
    path = "/api/estudiantes/{id}/reportes",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Reports of the student, most recent incident first", body = Vec<DetailedReport>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Student asked for another student", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_reports(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<StudentId>,
) -> Result<Json<Vec<DetailedReport>>, AppError> {
    auth_user.ensure_can_read_student(id)?;
    StudentService::ensure_student_exists(&state.db, id).await?;
    let reports = ReportService::get_student_reports(&state.db, id).await?;
    Ok(Json(reports))
}
