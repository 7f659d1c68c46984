use axum::{Router, middleware, routing::post};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{create_subject, get_subjects};

pub fn init_subjects_router(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/",
        post(create_subject)
            .route_layer(middleware::from_fn_with_state(state, require_admin))
            .get(get_subjects),
    )
}
