use axum::{Router, middleware, routing::post};

use crate::middleware::role::require_staff;
use crate::state::AppState;

use super::controller::{create_attendance, get_attendance};

pub fn init_attendance_router(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/",
        post(create_attendance)
            .route_layer(middleware::from_fn_with_state(state, require_staff))
            .get(get_attendance),
    )
}
