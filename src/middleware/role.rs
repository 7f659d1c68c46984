//! Route-level authorization by user type.
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/", post(create_user))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use cetis_auth::UserType;
use cetis_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Runs `next` only when the caller's user type is in `allowed`.
///
/// Missing or invalid tokens yield 401; a valid token of another type, 403.
pub async fn require_user_types(
    state: &AppState,
    req: Request,
    next: Next,
    allowed: &[UserType],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let auth_user = AuthUser::from_request_parts(&mut parts, state).await?;

    check_user_type(&auth_user, allowed)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub fn check_user_type(auth_user: &AuthUser, allowed: &[UserType]) -> Result<(), AppError> {
    if allowed.contains(&auth_user.user_type()) {
        return Ok(());
    }
    Err(AppError::forbidden(anyhow!(
        "Access denied. Required user type: {}",
        allowed
            .iter()
            .map(UserType::as_str)
            .collect::<Vec<_>>()
            .join(" or ")
    )))
}

/// `admon` only.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_user_types(&state, req, next, &[UserType::Admin])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

/// `admon` or `docente`.
pub async fn require_staff(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_user_types(&state, req, next, &[UserType::Admin, UserType::Teacher])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}
