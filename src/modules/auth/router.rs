use axum::{Router, routing::post};
use tower_governor::GovernorLayer;

use crate::state::AppState;

use super::controller::login_user;

/// Login is rate limited per client IP more tightly than the rest of the API.
pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    let governor_config = state.rate_limit_config.auth_governor_config();

    Router::new().route(
        "/login",
        post(login_user).layer(GovernorLayer::new(governor_config)),
    )
}
