use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{create_period, get_active_period, get_periods};

pub fn init_periods_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_period)
                .route_layer(middleware::from_fn_with_state(state, require_admin))
                .get(get_periods),
        )
        .route("/activo", get(get_active_period))
}
