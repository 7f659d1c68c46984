#![cfg(feature = "db-tests")]

mod common;

use axum::http::StatusCode;
use cetis::cetis_auth::{UserType, verify_token};
use cetis::router::init_router;
use common::{
    TEST_PASSWORD, body_json, create_specialty, create_student, create_user, request, test_state,
    unique_email,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success_returns_token_and_user(pool: PgPool) {
    let specialty_id = create_specialty(&pool, "PROG").await;
    let (user_id, student_id) = create_student(&pool, Some(specialty_id), 22050123456789).await;
    let email: String = sqlx::query_scalar("SELECT email FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();

    let state = test_state(pool);
    let app = init_router(state.clone());
    let response = app
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email.to_uppercase(), "password": TEST_PASSWORD })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user"]["userType"], "estudiante");
    assert_eq!(body["user"]["studentId"], student_id.0);
    assert_eq!(body["user"]["fullName"], "Ana López Ruiz");

    let claims = verify_token(body["token"].as_str().unwrap(), &state.jwt_config).unwrap();
    assert_eq!(claims.user_type, UserType::Student);
    assert_eq!(claims.student_id, Some(student_id.0));
    assert_eq!(claims.sub, user_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let email = unique_email();
    create_user(&pool, &email, UserType::Teacher).await;

    let app = init_router(test_state(pool));
    let response = app
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": "wrong-password" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let app = init_router(test_state(pool));
    let response = app
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "nobody@cetis27.edu.mx", "password": TEST_PASSWORD })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_inactive_account(pool: PgPool) {
    let email = unique_email();
    let user_id = create_user(&pool, &email, UserType::Admin).await;
    sqlx::query("UPDATE users SET active = FALSE WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let app = init_router(test_state(pool));
    let response = app
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": TEST_PASSWORD })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
