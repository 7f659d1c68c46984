use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use cetis_core::AppError;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::groups::model::{CreateGroupDto, Group, GroupFilterParams, PaginatedGroupsResponse};
use crate::modules::groups::service::GroupService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/grupos",
    request_body = CreateGroupDto,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 400, description = "Duplicate code in period, unknown reference or malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Groups",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_group(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateGroupDto>,
) -> Result<(StatusCode, Json<Group>), AppError> {
    let group = GroupService::create_group(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    get,
    path = "/api/grupos",
    params(GroupFilterParams),
    responses(
        (status = 200, description = "List of groups", body = PaginatedGroupsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Groups",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_groups(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<GroupFilterParams>,
) -> Result<Json<PaginatedGroupsResponse>, AppError> {
    let groups = GroupService::get_groups(&state.db, filters).await?;
    Ok(Json(groups))
}
