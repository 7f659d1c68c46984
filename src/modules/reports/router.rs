use axum::{
    Router, middleware,
    routing::{post, put},
};

use crate::middleware::role::require_staff;
use crate::state::AppState;

use super::controller::{create_report, get_reports, review_report};

pub fn init_reports_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_report)
                .route_layer(middleware::from_fn_with_state(state.clone(), require_staff))
                .get(get_reports),
        )
        .route(
            "/{id}/revision",
            put(review_report).route_layer(middleware::from_fn_with_state(state, require_staff)),
        )
}
