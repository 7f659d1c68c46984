use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_user, get_users};

/// Admin-only; the caller applies `require_admin`.
pub fn init_users_router() -> Router<AppState> {
    Router::new().route("/", get(get_users).post(create_user))
}
