use axum::{Router, middleware, routing::post};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{create_group, get_groups};

pub fn init_groups_router(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/",
        post(create_group)
            .route_layer(middleware::from_fn_with_state(state, require_admin))
            .get(get_groups),
    )
}
