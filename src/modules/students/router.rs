use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_admin, require_staff};
use crate::state::AppState;

use super::controller::{
    create_student, get_attendance_groups, get_attendance_sheet, get_attendance_stats,
    get_student, get_student_credential, get_student_reports, get_students,
};

pub fn init_students_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_student)
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
                .merge(
                    get(get_students)
                        .route_layer(middleware::from_fn_with_state(state, require_staff)),
                ),
        )
        .route("/{id}", get(get_student))
        .route("/{id}/credencial", get(get_student_credential))
        .route("/{id}/asistencias/estadisticas", get(get_attendance_stats))
        .route("/{id}/asistencias/grupos", get(get_attendance_groups))
        .route("/{id}/grupos/{grupo_id}/asistencias", get(get_attendance_sheet))
        .route("/{id}/reportes", get(get_student_reports))
}
