use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_admin, require_staff};
use crate::state::AppState;

use super::controller::{create_teacher, get_teachers};

pub fn init_teachers_router(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/",
        post(create_teacher)
            .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
            .merge(
                get(get_teachers)
                    .route_layer(middleware::from_fn_with_state(state, require_staff)),
            ),
    )
}
