use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use cetis_core::AppError;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::specialties::model::{
    CreateSpecialtyDto, PaginatedSpecialtiesResponse, Specialty, SpecialtyFilterParams,
};
use crate::modules::specialties::service::SpecialtyService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/especialidades",
    request_body = CreateSpecialtyDto,
    responses(
        (status = 201, description = "Specialty created", body = Specialty),
        (status = 400, description = "Duplicate code or malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Specialties",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_specialty(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSpecialtyDto>,
) -> Result<(StatusCode, Json<Specialty>), AppError> {
    let specialty = SpecialtyService::create_specialty(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(specialty)))
}

#[utoipa::path(
    get,
    path = "/api/especialidades",
    params(SpecialtyFilterParams),
    responses(
        (status = 200, description = "List of specialties", body = PaginatedSpecialtiesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Specialties",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_specialties(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<SpecialtyFilterParams>,
) -> Result<Json<PaginatedSpecialtiesResponse>, AppError> {
    let specialties = SpecialtyService::get_specialties(&state.db, filters).await?;
    Ok(Json(specialties))
}
