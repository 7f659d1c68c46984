use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::role::require_admin;
use crate::modules::attendance::init_attendance_router;
use crate::modules::auth::init_auth_router;
use crate::modules::enrollments::init_enrollments_router;
use crate::modules::groups::init_groups_router;
use crate::modules::periods::init_periods_router;
use crate::modules::reports::init_reports_router;
use crate::modules::specialties::init_specialties_router;
use crate::modules::students::init_students_router;
use crate::modules::subjects::init_subjects_router;
use crate::modules::teachers::init_teachers_router;
use crate::modules::users::init_users_router;
use crate::state::AppState;

async fn root() -> &'static str {
    "API funcionando"
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

fn api_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", init_auth_router(state))
        .nest(
            "/usuarios",
            init_users_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        )
        .nest("/especialidades", init_specialties_router(state.clone()))
        .nest("/materias", init_subjects_router(state.clone()))
        .nest("/periodos", init_periods_router(state.clone()))
        .nest("/docentes", init_teachers_router(state.clone()))
        .nest("/grupos", init_groups_router(state.clone()))
        .nest("/inscripciones", init_enrollments_router(state.clone()))
        .nest("/asistencias", init_attendance_router(state.clone()))
        .nest("/reportes", init_reports_router(state.clone()))
        .nest("/estudiantes", init_students_router(state.clone()))
        .layer(GovernorLayer::new(
            state.rate_limit_config.general_governor_config(),
        ))
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", api_router(&state))
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
